use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Масть карты. Порядок совпадает с `id % 4`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Ранг карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Индекс 0..12 (двойка = 0, туз = 12).
    pub const fn index(self) -> u8 {
        self as u8 - 2
    }
}

/// Идентификатор карты 0..51.
///
/// `rank = id / 4`, `suit = id % 4`. В этом виде карты приходят из реестра
/// NFT-рук и из оракула, а эвалюатор работает только с ними.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u8);

impl CardId {
    pub const COUNT: u8 = 52;

    /// Проверенный конструктор.
    pub fn new(id: u8) -> Option<Self> {
        (id < Self::COUNT).then_some(CardId(id))
    }

    pub const fn is_valid(self) -> bool {
        self.0 < Self::COUNT
    }

    /// Индекс ранга 0..12.
    pub const fn rank_index(self) -> u8 {
        self.0 >> 2
    }

    /// Индекс масти 0..3.
    pub const fn suit_index(self) -> u8 {
        self.0 & 0x3
    }

    pub fn rank(self) -> Rank {
        Rank::ALL[self.rank_index() as usize % 13]
    }

    pub fn suit(self) -> Suit {
        Suit::ALL[self.suit_index() as usize]
    }

    pub fn to_card(self) -> Card {
        Card::new(self.rank(), self.suit())
    }

    pub const fn from_card(card: Card) -> Self {
        CardId(card.rank.index() * 4 + card.suit.index())
    }
}

/// Обычная покерная карта (52-карточная колода).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn id(self) -> CardId {
        CardId::from_card(self)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            r => char::from_digit(*r as u32, 10).unwrap_or('?'),
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `7c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.to_card())
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Парсинг строки вида "Ah", "Td", "7c".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (r_ch, s_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => return Err("Card string must have length 2".into()),
        };

        let rank = match r_ch {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' | 't' => Rank::Ten,
            'J' | 'j' => Rank::Jack,
            'Q' | 'q' => Rank::Queen,
            'K' | 'k' => Rank::King,
            'A' | 'a' => Rank::Ace,
            _ => return Err(format!("Invalid rank: {r_ch}")),
        };

        let suit = match s_ch {
            'c' | 'C' => Suit::Clubs,
            'd' | 'D' => Suit::Diamonds,
            'h' | 'H' => Suit::Hearts,
            's' | 'S' => Suit::Spades,
            _ => return Err(format!("Invalid suit: {s_ch}")),
        };

        Ok(Card { rank, suit })
    }
}

impl FromStr for CardId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Card>().map(CardId::from_card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_decomposes_into_rank_and_suit() {
        // 51 = туз пик, 0 = двойка треф
        assert_eq!(CardId(51).to_card(), Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(CardId(0).to_card(), Card::new(Rank::Two, Suit::Clubs));
        assert_eq!(CardId(35).to_string(), "Ts");
    }

    #[test]
    fn card_round_trips_through_id() {
        for id in 0..52u8 {
            let card = CardId(id).to_card();
            assert_eq!(card.id(), CardId(id));
        }
        assert_eq!("Ah".parse::<CardId>().unwrap(), CardId(50));
        assert!(CardId::new(52).is_none());
    }
}
