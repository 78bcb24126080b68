use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::card::CardId;
use crate::domain::chips::Chips;
use crate::domain::hand::{RankScore, Round};
use crate::domain::{GameId, PlayerId, RequestId, TokenId};
use crate::eval::HandCategory;

/// Уведомление для внешних наблюдателей.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum GameEventKind {
    GameStarted {
        game_id: GameId,
        round_secs: u64,
        flop_price: Chips,
        turn_price: Chips,
    },

    /// Ушёл запрос случайности под раздачу раунда.
    CardDealRequested {
        game_id: GameId,
        round: Round,
        request_id: RequestId,
    },

    /// Открыта одна общая карта.
    CardDealt {
        game_id: GameId,
        round: Round,
        card: CardId,
    },

    HandAdded {
        game_id: GameId,
        round: Round,
        player_id: PlayerId,
        token_id: TokenId,
    },

    FeePaid {
        game_id: GameId,
        player_id: PlayerId,
        amount: Chips,
    },

    FinalHandPlayed {
        game_id: GameId,
        player_id: PlayerId,
        cards: [CardId; 5],
        score: RankScore,
        category: HandCategory,
    },

    /// Начисление выигрыша игроку.
    WinningsCalculated {
        game_id: GameId,
        player_id: PlayerId,
        amount: Chips,
    },

    Refunded {
        game_id: GameId,
        player_id: PlayerId,
        amount: Chips,
    },

    GameDeleted {
        game_id: GameId,
    },

    RefundableGame {
        game_id: GameId,
    },

    Withdrawal {
        player_id: PlayerId,
        amount: Chips,
    },

    HouseCutWithdrawn {
        amount: Chips,
    },
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GameEvent {
    pub index: u64,
    pub kind: GameEventKind,
}

/// Сколько последних событий журнал держит по умолчанию.
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 1_024;

/// Журнал уведомлений арены (по всем играм, в порядке появления).
///
/// Хранит только последние `capacity` событий. Индексы сквозные:
/// вытесненные события просто пропадают из `since`, нумерация не сдвигается.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EventLog {
    capacity: usize,
    /// Индекс самого старого события в `events`.
    first_index: u64,
    events: VecDeque<GameEvent>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            first_index: 0,
            events: VecDeque::with_capacity(capacity.min(DEFAULT_EVENT_LOG_CAPACITY)),
        }
    }

    pub fn push(&mut self, kind: GameEventKind) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
            self.first_index += 1;
        }
        let index = self.next_index();
        self.events.push_back(GameEvent { index, kind });
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Индекс самого старого из хранимых событий.
    pub fn first_index(&self) -> u64 {
        self.first_index
    }

    /// Индекс, который получит следующее событие.
    pub fn next_index(&self) -> u64 {
        self.first_index + self.events.len() as u64
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&GameEvent> {
        self.events.back()
    }

    /// События с индексом `>= from` (для поллинга наблюдателем).
    pub fn since(&self, from: u64) -> impl Iterator<Item = &GameEvent> {
        let skip = from.saturating_sub(self.first_index) as usize;
        self.events.iter().skip(skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deleted(game_id: GameId) -> GameEventKind {
        GameEventKind::GameDeleted { game_id }
    }

    #[test]
    fn old_events_are_evicted_but_indices_keep_counting() {
        let mut log = EventLog::with_capacity(3);
        for id in 0..10 {
            log.push(deleted(id));
        }

        assert_eq!(log.len(), 3);
        assert_eq!(log.first_index(), 7);
        assert_eq!(log.next_index(), 10);
        let kept: Vec<u64> = log.iter().map(|e| e.index).collect();
        assert_eq!(kept, vec![7, 8, 9]);

        // Наблюдатель, отставший дальше окна, получает всё, что осталось.
        assert_eq!(log.since(2).count(), 3);
        let tail: Vec<u64> = log.since(8).map(|e| e.index).collect();
        assert_eq!(tail, vec![8, 9]);
        assert_eq!(log.since(10).count(), 0);
        assert_eq!(log.last().map(|e| e.kind.clone()), Some(deleted(9)));
    }
}
