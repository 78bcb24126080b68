// src/time_ctrl/time_rules.rs
//! Правила тайминга раундов игры.
//!
//! Здесь описываем только "правила", без состояния и без привязки к конкретной игре.

use serde::{Deserialize, Serialize};

/// Правила тайминга одной игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRules {
    /// Сколько секунд длится окно действий после раздачи
    /// (и сколько ждём оракула после запроса).
    pub round_secs: u64,
    /// Сколько ещё секунд после дедлайна игра не считается зависшей.
    pub stale_grace_secs: u64,
}

impl TimeRules {
    /// Строгий конструктор.
    pub const fn new(round_secs: u64, stale_grace_secs: u64) -> Self {
        Self {
            round_secs,
            stale_grace_secs,
        }
    }
}
