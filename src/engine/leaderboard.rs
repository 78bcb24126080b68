use serde::{Deserialize, Serialize};

use crate::domain::hand::RankScore;
use crate::domain::PlayerId;
use crate::eval::HandCategory;

/// Сколько игроков может попасть в лидерборд одной игры.
pub const LEADERBOARD_CAPACITY: usize = 10;

/// Одна строка лидерборда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub score: RankScore,
    pub category: HandCategory,
}

/// Лидерборд фиксированной ёмкости, по возрастанию score (лучшие – в начале).
///
/// Равные score стоят в порядке вставки: кто раньше сыграл, тот выше.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(LEADERBOARD_CAPACITY),
        }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= LEADERBOARD_CAPACITY
    }

    /// Вставить результат. Возвращает позицию или None, если рука не прошла в топ.
    ///
    /// На полном лидерборде score не лучше последнего (хуже или равный) отклоняется.
    pub fn insert(
        &mut self,
        player_id: PlayerId,
        score: RankScore,
        category: HandCategory,
    ) -> Option<usize> {
        if self.is_full() {
            let worst = self.entries.last()?.score;
            if !score.beats(worst) {
                return None;
            }
        }

        // Первая позиция, где сидящий строго хуже; иначе – в конец.
        let pos = self
            .entries
            .iter()
            .position(|e| score.beats(e.score))
            .unwrap_or(self.entries.len());

        self.entries.insert(
            pos,
            LeaderboardEntry {
                player_id,
                score,
                category,
            },
        );
        self.entries.truncate(LEADERBOARD_CAPACITY);
        Some(pos)
    }

    /// Позиция игрока или -1, если его нет.
    pub fn position(&self, player_id: PlayerId) -> i32 {
        self.entries
            .iter()
            .position(|e| e.player_id == player_id)
            .map_or(-1, |p| p as i32)
    }

    /// Все, у кого лучший score.
    pub fn winners(&self) -> &[LeaderboardEntry] {
        let Some(best) = self.entries.first().map(|e| e.score) else {
            return &[];
        };
        let n = self.entries.iter().take_while(|e| e.score == best).count();
        &self.entries[..n]
    }

    /// Остальные записи лидерборда.
    pub fn runner_ups(&self) -> &[LeaderboardEntry] {
        let n = self.winners().len();
        &self.entries[n..]
    }

    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].score <= w[1].score)
    }
}
