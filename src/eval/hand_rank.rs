use serde::{Deserialize, Serialize};

use crate::domain::hand::RankScore;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

/// Границы полос: (худший score в полосе, категория), от сильных к слабым.
///
/// Полосы не пересекаются и вместе покрывают 1..=7462.
pub const CATEGORY_BOUNDS: [(u16, HandCategory); 10] = [
    (1, HandCategory::RoyalFlush),
    (10, HandCategory::StraightFlush),
    (166, HandCategory::FourOfAKind),
    (322, HandCategory::FullHouse),
    (1599, HandCategory::Flush),
    (1609, HandCategory::Straight),
    (2467, HandCategory::ThreeOfAKind),
    (3325, HandCategory::TwoPair),
    (6185, HandCategory::OnePair),
    (7462, HandCategory::HighCard),
];

impl HandCategory {
    /// Категория по score. Для score вне 1..=7462 – None.
    pub fn from_score(score: RankScore) -> Option<Self> {
        if score.0 == 0 {
            return None;
        }
        CATEGORY_BOUNDS
            .iter()
            .find(|(upper, _)| score.0 <= *upper)
            .map(|(_, cat)| *cat)
    }

    /// Диапазон score этой категории (включительно).
    pub fn score_range(self) -> (u16, u16) {
        let pos = CATEGORY_BOUNDS
            .iter()
            .position(|(_, cat)| *cat == self)
            .unwrap_or(CATEGORY_BOUNDS.len() - 1);
        let lo = if pos == 0 { 1 } else { CATEGORY_BOUNDS[pos - 1].0 + 1 };
        (lo, CATEGORY_BOUNDS[pos].0)
    }
}

/// Человеческое описание руки по категории.
pub fn describe_hand(score: RankScore) -> String {
    let name = match HandCategory::from_score(score) {
        Some(HandCategory::RoyalFlush) => "Royal flush",
        Some(HandCategory::StraightFlush) => "Straight flush",
        Some(HandCategory::FourOfAKind) => "Four of a kind",
        Some(HandCategory::FullHouse) => "Full house",
        Some(HandCategory::Flush) => "Flush",
        Some(HandCategory::Straight) => "Straight",
        Some(HandCategory::ThreeOfAKind) => "Three of a kind",
        Some(HandCategory::TwoPair) => "Two pair",
        Some(HandCategory::OnePair) => "One pair",
        Some(HandCategory::HighCard) => "High card",
        None => "Invalid",
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_contiguous() {
        let mut expected_lo = 1;
        for (_, cat) in CATEGORY_BOUNDS {
            let (lo, hi) = cat.score_range();
            assert_eq!(lo, expected_lo);
            assert!(hi >= lo);
            expected_lo = hi + 1;
        }
        assert_eq!(expected_lo, 7463);
    }

    #[test]
    fn out_of_range_scores_have_no_category() {
        assert_eq!(HandCategory::from_score(RankScore(0)), None);
        assert_eq!(HandCategory::from_score(RankScore(7463)), None);
        assert_eq!(
            HandCategory::from_score(RankScore(2)),
            Some(HandCategory::StraightFlush)
        );
    }
}
