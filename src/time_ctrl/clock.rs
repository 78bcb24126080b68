// src/time_ctrl/clock.rs
//! Дедлайн текущего раунда игры.

use serde::{Deserialize, Serialize};

use crate::domain::Timestamp;

use super::TimeRules;

/// Фаза раунда относительно дедлайна.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundPhase {
    /// Дедлайн ещё не наступил: можно действовать.
    Open,
    /// Дедлайн прошёл, но игра ещё не зависла.
    Ended,
    /// Дедлайн + grace прошли без прогресса.
    Stale,
}

/// Таймер раунда: хранит только момент окончания.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundClock {
    pub round_end_time: Timestamp,
}

impl RoundClock {
    pub fn new() -> Self {
        Self { round_end_time: 0 }
    }

    /// Перезапустить дедлайн от `now`.
    pub fn restart(&mut self, now: Timestamp, rules: &TimeRules) {
        self.round_end_time = now.saturating_add(rules.round_secs);
    }

    pub fn phase(&self, now: Timestamp, rules: &TimeRules) -> RoundPhase {
        if now < self.round_end_time {
            RoundPhase::Open
        } else if now < self.round_end_time.saturating_add(rules.stale_grace_secs) {
            RoundPhase::Ended
        } else {
            RoundPhase::Stale
        }
    }

    pub fn is_open(&self, now: Timestamp) -> bool {
        now < self.round_end_time
    }

    pub fn has_ended(&self, now: Timestamp) -> bool {
        now >= self.round_end_time
    }
}

impl Default for RoundClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_follow_deadline_and_grace() {
        let rules = TimeRules::new(100, 50);
        let mut clock = RoundClock::new();
        clock.restart(1_000, &rules);

        assert_eq!(clock.phase(1_099, &rules), RoundPhase::Open);
        assert_eq!(clock.phase(1_100, &rules), RoundPhase::Ended);
        assert_eq!(clock.phase(1_149, &rules), RoundPhase::Ended);
        assert_eq!(clock.phase(1_150, &rules), RoundPhase::Stale);
    }
}
