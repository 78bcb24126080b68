use serde::{Deserialize, Serialize};

use crate::domain::card::CardId;
use crate::domain::{HandId, TokenId};

/// Раунд раздачи общих карт.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Round {
    Flop,
    Turn,
    River,
}

impl Round {
    /// Сколько общих карт открывается в этом раунде.
    pub const fn cards_dealt(self) -> usize {
        match self {
            Round::Flop => 3,
            Round::Turn | Round::River => 1,
        }
    }

    pub const fn next(self) -> Option<Round> {
        match self {
            Round::Flop => Some(Round::Turn),
            Round::Turn => Some(Round::River),
            Round::River => None,
        }
    }
}

/// Сила руки: выход эвалюатора. Меньше = сильнее, 1 = роял-флеш.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankScore(pub u16);

impl RankScore {
    pub const BEST: RankScore = RankScore(1);
    pub const WORST: RankScore = RankScore(7462);

    /// Сильнее ли эта рука, чем `other`.
    pub fn beats(self, other: RankScore) -> bool {
        self.0 < other.0
    }
}

/// Карманные карты NFT-руки (пара из реестра ассетов).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HoleCards {
    pub hand_id: HandId,
    pub cards: [CardId; 2],
}

impl HoleCards {
    pub fn intersects(&self, dealt: &[CardId]) -> bool {
        self.cards.iter().any(|c| dealt.contains(c))
    }
}

/// Итоговая 5-карточная рука игрока (2 карманные + 3 с борда).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinalHand {
    pub token_id: TokenId,
    pub cards: [CardId; 5],
    pub score: RankScore,
}
