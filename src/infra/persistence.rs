use std::collections::HashMap;

use crate::state::ArenaSnapshot;

/// Абстракция хранилища арены.
///
/// В Linera-режиме вместо этого используется `PokerArenaState` и Views,
/// но эта абстракция удобна:
/// - для интеграционных тестов движка,
/// - для оффчейн-запуска (симулятор, наблюдатели).
pub trait ArenaStorage {
    /// Загрузить снапшот арены по ключу.
    fn load(&self, key: &str) -> Result<Option<ArenaSnapshot>, serde_json::Error>;

    /// Сохранить снапшот.
    fn save(&mut self, key: &str, snapshot: &ArenaSnapshot) -> Result<(), serde_json::Error>;
}

/// In-memory реализация: снапшоты лежат как JSON-строки.
#[derive(Debug, Default)]
pub struct InMemoryArenaStorage {
    blobs: HashMap<String, String>,
}

impl InMemoryArenaStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сырой JSON (для отладки).
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl ArenaStorage for InMemoryArenaStorage {
    fn load(&self, key: &str) -> Result<Option<ArenaSnapshot>, serde_json::Error> {
        self.blobs
            .get(key)
            .map(|raw| serde_json::from_str(raw))
            .transpose()
    }

    fn save(&mut self, key: &str, snapshot: &ArenaSnapshot) -> Result<(), serde_json::Error> {
        let raw = serde_json::to_string(snapshot)?;
        self.blobs.insert(key.to_string(), raw);
        Ok(())
    }
}
