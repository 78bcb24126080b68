use serde::{Deserialize, Serialize};

use crate::domain::card::CardId;

/// Колода игры: битсет из 52 карт, которые ещё НЕ открыты на борде.
///
/// Бит `i` выставлен ⇔ карта `i` ещё может быть сдана как общая.
/// Карманные карты сюда не входят – они принадлежат NFT-рукам игроков.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameDeck {
    pub bits: u64,
}

impl GameDeck {
    const FULL: u64 = (1u64 << 52) - 1;

    /// Полная колода из 52 карт.
    pub fn full() -> Self {
        Self { bits: Self::FULL }
    }

    pub fn remaining(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn contains(&self, card: CardId) -> bool {
        card.is_valid() && self.bits & (1u64 << card.0) != 0
    }

    /// Убрать из колоды n-ю (по возрастанию id) оставшуюся карту.
    pub fn take_nth(&mut self, n: u32) -> Option<CardId> {
        if n >= self.remaining() {
            return None;
        }
        let mut rest = self.bits;
        for _ in 0..n {
            rest &= rest - 1; // снимаем младший бит
        }
        let id = rest.trailing_zeros() as u8;
        self.bits &= !(1u64 << id);
        Some(CardId(id))
    }

    /// Сдать `count` карт из случайного значения: индекс = `value % remaining`,
    /// затем `value /= remaining` для следующей карты.
    pub fn draw_from_random(&mut self, mut value: u128, count: usize) -> Vec<CardId> {
        let mut taken = Vec::with_capacity(count);
        for _ in 0..count {
            let remaining = self.remaining() as u128;
            if remaining == 0 {
                break;
            }
            let idx = (value % remaining) as u32;
            value /= remaining;
            if let Some(card) = self.take_nth(idx) {
                taken.push(card);
            }
        }
        taken
    }
}

impl Default for GameDeck {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_nth_walks_remaining_cards_in_order() {
        let mut deck = GameDeck::full();
        assert_eq!(deck.take_nth(0), Some(CardId(0)));
        // после удаления нулевой карты 0-я оставшаяся – это карта 1
        assert_eq!(deck.take_nth(0), Some(CardId(1)));
        assert_eq!(deck.take_nth(49), Some(CardId(51)));
        assert_eq!(deck.remaining(), 49);
        assert_eq!(deck.take_nth(49), None);
    }

    #[test]
    fn draw_never_repeats_cards() {
        let mut deck = GameDeck::full();
        let mut seen = Vec::new();
        for value in [u128::MAX, 7, 0, 123_456_789, 52 * 51] {
            for card in deck.draw_from_random(value, 3) {
                assert!(!seen.contains(&card));
                seen.push(card);
            }
        }
        assert_eq!(seen.len(), 15);
        assert_eq!(deck.remaining(), 37);
    }
}
