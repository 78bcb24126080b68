use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{GameId, TokenId};

/// Простая генерация ID на основе монотонных счётчиков.
///
/// Id игр не переиспользуются даже после удаления игры: поздний колбэк
/// оракула к удалённой игре не может попасть в новую.
#[derive(Debug)]
pub struct IdGenerator {
    game_counter: AtomicU64,
    token_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self::starting_at(1, 1)
    }

    /// Продолжить счёт с заданных значений (после восстановления состояния).
    pub fn starting_at(next_game: GameId, next_token: TokenId) -> Self {
        Self {
            game_counter: AtomicU64::new(next_game),
            token_counter: AtomicU64::new(next_token),
        }
    }

    #[inline]
    pub fn next_game_id(&self) -> GameId {
        self.game_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn peek_game_id(&self) -> GameId {
        self.game_counter.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn next_token_id(&self) -> TokenId {
        self.token_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
