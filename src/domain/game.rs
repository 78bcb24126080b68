use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Round;
use crate::time_ctrl::TimeRules;

/// Статус игры. Отсутствие игры в реестре = NOT_EXIST, после RIVER_DEALT игра удаляется.
///
/// FLOP_WAIT → FLOP_DEALT → TURN_WAIT → TURN_DEALT → RIVER_WAIT → RIVER_DEALT
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameStatus {
    FlopWait,
    FlopDealt,
    TurnWait,
    TurnDealt,
    RiverWait,
    RiverDealt,
}

impl GameStatus {
    /// Ждём случайность для этого раунда.
    pub const fn waiting_for(round: Round) -> Self {
        match round {
            Round::Flop => GameStatus::FlopWait,
            Round::Turn => GameStatus::TurnWait,
            Round::River => GameStatus::RiverWait,
        }
    }

    /// Карты этого раунда уже открыты.
    pub const fn dealt(round: Round) -> Self {
        match round {
            Round::Flop => GameStatus::FlopDealt,
            Round::Turn => GameStatus::TurnDealt,
            Round::River => GameStatus::RiverDealt,
        }
    }

    /// Раунд, карты которого уже на столе (если игра в `*_DEALT`).
    pub const fn dealt_round(self) -> Option<Round> {
        match self {
            GameStatus::FlopDealt => Some(Round::Flop),
            GameStatus::TurnDealt => Some(Round::Turn),
            GameStatus::RiverDealt => Some(Round::River),
            _ => None,
        }
    }
}

/// Параметры конкретной игры: тайминг и цены раундов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameParams {
    pub rules: TimeRules,
    pub flop_price: Chips,
    pub turn_price: Chips,
}

impl GameParams {
    /// Цена участия в раунде. На ривере NFT не покупаются.
    pub fn price(&self, round: Round) -> Option<Chips> {
        match round {
            Round::Flop => Some(self.flop_price),
            Round::Turn => Some(self.turn_price),
            Round::River => None,
        }
    }
}
