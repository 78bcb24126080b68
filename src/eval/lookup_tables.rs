//! Таблицы perfect-hash эвалюатора.
//!
//! Четыре таблицы:
//!   - `suits`   – sparse-таблица по suit-hash: 0 = флеша нет, иначе масть+1;
//!   - `flush`   – по 13-битной маске рангов одной масти → score (включая стрит-флеши);
//!   - `noflush` – по quinary-hash вектора количеств рангов → score;
//!   - `dp`      – 3D-таблица [count][ranks_left][cards_left] для quinary-hash.
//!
//! Таблицы строятся один раз (`generate` или через `TableUpload`) и дальше
//! только читаются: никаких `&mut self` методов у `EvaluatorTables` нет.

use serde::{Deserialize, Serialize};

use crate::domain::card::CardId;
use crate::domain::hand::RankScore;

use super::errors::EvalError;

/// Битовая маска рангов: бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

pub const RANKS: usize = 13;
/// Максимум карт в quinary-векторе + 1 (для 5-карточной руки).
pub const DP_CARDS: usize = 6;
pub const DP_RANKS: usize = RANKS + 1;
/// Значения count 0..=4.
pub const DP_COUNTS: usize = 5;

pub const SUIT_TABLE_SIZE: usize = 4096;
pub const FLUSH_TABLE_SIZE: usize = 8192;
/// Число векторов длины 13 с цифрами 0..4 и суммой 5.
pub const NOFLUSH_TABLE_SIZE: usize = 6175;
pub const DP_TABLE_SIZE: usize = DP_COUNTS * DP_RANKS * DP_CARDS;

/// Вид таблицы (для загрузки батчами и ошибок).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TableKind {
    Suits,
    Flush,
    NoFlush,
    Dp,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Suits,
        TableKind::Flush,
        TableKind::NoFlush,
        TableKind::Dp,
    ];

    pub const fn len(self) -> usize {
        match self {
            TableKind::Suits => SUIT_TABLE_SIZE,
            TableKind::Flush => FLUSH_TABLE_SIZE,
            TableKind::NoFlush => NOFLUSH_TABLE_SIZE,
            TableKind::Dp => DP_TABLE_SIZE,
        }
    }
}

/// Маски всех стритов от сильнейшего (TJQKA) к слабейшему (A2345).
pub const STRAIGHT_MASKS: [RankMask; 10] = [
    mask_from_indices(&[8, 9, 10, 11, 12]),
    mask_from_indices(&[7, 8, 9, 10, 11]),
    mask_from_indices(&[6, 7, 8, 9, 10]),
    mask_from_indices(&[5, 6, 7, 8, 9]),
    mask_from_indices(&[4, 5, 6, 7, 8]),
    mask_from_indices(&[3, 4, 5, 6, 7]),
    mask_from_indices(&[2, 3, 4, 5, 6]),
    mask_from_indices(&[1, 2, 3, 4, 5]),
    mask_from_indices(&[0, 1, 2, 3, 4]),
    // wheel: A,2,3,4,5
    mask_from_indices(&[12, 0, 1, 2, 3]),
];

/// Построить маску из индексов рангов.
pub const fn mask_from_indices(ranks: &[u8]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        mask |= 1 << ranks[i];
        i += 1;
    }
    mask
}

fn is_straight(mask: RankMask) -> bool {
    STRAIGHT_MASKS.contains(&mask)
}

#[inline]
const fn dp_index(count: usize, ranks_left: usize, cards_left: usize) -> usize {
    (count * DP_RANKS + ranks_left) * DP_CARDS + cards_left
}

/// Все четыре таблицы. Неизменяемы после построения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluatorTables {
    suits: Vec<u8>,
    flush: Vec<u16>,
    noflush: Vec<u16>,
    dp: Vec<u32>,
}

impl EvaluatorTables {
    /// Собрать таблицы из уже загруженных данных с проверкой размеров и диапазонов.
    ///
    /// Значения `dp` не больше `NOFLUSH_TABLE_SIZE`: иначе quinary-hash
    /// уходит за пределы `noflush`.
    pub fn from_raw(
        suits: Vec<u32>,
        flush: Vec<u32>,
        noflush: Vec<u32>,
        dp: Vec<u32>,
    ) -> Result<Self, EvalError> {
        fn narrow<T: TryFrom<u32>>(
            kind: TableKind,
            raw: Vec<u32>,
            max: u32,
        ) -> Result<Vec<T>, EvalError> {
            if raw.len() != kind.len() {
                return Err(EvalError::TableIncomplete(kind));
            }
            raw.into_iter()
                .map(|v| {
                    if v > max {
                        return Err(EvalError::ValueOutOfRange(kind));
                    }
                    T::try_from(v).map_err(|_| EvalError::ValueOutOfRange(kind))
                })
                .collect()
        }

        let worst = RankScore::WORST.0 as u32;
        Ok(Self {
            suits: narrow(TableKind::Suits, suits, 4)?,
            flush: narrow(TableKind::Flush, flush, worst)?,
            noflush: narrow(TableKind::NoFlush, noflush, worst)?,
            dp: narrow(TableKind::Dp, dp, NOFLUSH_TABLE_SIZE as u32)?,
        })
    }

    /// Посчитать все таблицы комбинаторно.
    ///
    /// Score выдаются подряд от 1 (роял-флеш) до 7462 (7-5-4-3-2 разномастные)
    /// в порядке убывания силы внутри каждой категории.
    pub fn generate() -> Self {
        let dp = build_dp();
        let suits = build_suits();
        let mut flush = vec![0u16; FLUSH_TABLE_SIZE];
        let mut noflush = vec![0u16; NOFLUSH_TABLE_SIZE];

        let distinct = distinct_masks_desc();
        let mut score: u16 = 1;
        let mut put_noflush = |counts: &[u8; RANKS], score: &mut u16| {
            noflush[hash_quinary(&dp, counts, 5)] = *score;
            *score += 1;
        };

        // Стрит-флеши (роял = 1).
        for mask in STRAIGHT_MASKS {
            flush[mask as usize] = score;
            score += 1;
        }

        // Каре: ранг каре, затем кикер – оба по убыванию.
        for quad in (0..RANKS).rev() {
            for kicker in (0..RANKS).rev().filter(|&k| k != quad) {
                put_noflush(&counts_of(&[(quad, 4), (kicker, 1)]), &mut score);
            }
        }

        // Фулл-хаус.
        for trips in (0..RANKS).rev() {
            for pair in (0..RANKS).rev().filter(|&p| p != trips) {
                put_noflush(&counts_of(&[(trips, 3), (pair, 2)]), &mut score);
            }
        }

        // Флеши (не стриты).
        for &mask in distinct.iter().filter(|m| !is_straight(**m)) {
            flush[mask as usize] = score;
            score += 1;
        }

        // Стриты.
        for mask in STRAIGHT_MASKS {
            put_noflush(&counts_from_mask(mask), &mut score);
        }

        // Сет + два кикера.
        for trips in (0..RANKS).rev() {
            for a in (0..RANKS).rev().filter(|&r| r != trips) {
                for b in (0..a).rev().filter(|&r| r != trips) {
                    put_noflush(&counts_of(&[(trips, 3), (a, 1), (b, 1)]), &mut score);
                }
            }
        }

        // Две пары + кикер.
        for high in (0..RANKS).rev() {
            for low in (0..high).rev() {
                for kicker in (0..RANKS).rev().filter(|&k| k != high && k != low) {
                    put_noflush(&counts_of(&[(high, 2), (low, 2), (kicker, 1)]), &mut score);
                }
            }
        }

        // Пара + три кикера.
        for pair in (0..RANKS).rev() {
            for a in (0..RANKS).rev().filter(|&r| r != pair) {
                for b in (0..a).rev().filter(|&r| r != pair) {
                    for c in (0..b).rev().filter(|&r| r != pair) {
                        put_noflush(
                            &counts_of(&[(pair, 2), (a, 1), (b, 1), (c, 1)]),
                            &mut score,
                        );
                    }
                }
            }
        }

        // Старшая карта.
        for &mask in distinct.iter().filter(|m| !is_straight(**m)) {
            put_noflush(&counts_from_mask(mask), &mut score);
        }

        debug_assert_eq!(score - 1, RankScore::WORST.0);

        Self {
            suits,
            flush,
            noflush,
            dp,
        }
    }

    /// Оценить ровно 5 карт. Дубликаты карт не проверяются отдельно,
    /// но невозможный набор даёт `MalformedHand`, а не панику.
    pub fn score_five(&self, cards: [CardId; 5]) -> Result<RankScore, EvalError> {
        if let Some(bad) = cards.iter().find(|c| !c.is_valid()) {
            return Err(EvalError::InvalidCard(bad.0));
        }

        let suit_hash: usize = cards
            .iter()
            .map(|c| 1usize << (c.suit_index() as usize * 3))
            .sum();

        let flush_suit = self.suits.get(suit_hash).copied().unwrap_or(0);
        let score = if flush_suit != 0 {
            let mut suit_binary = [0u16; 4];
            for c in cards.iter() {
                suit_binary[c.suit_index() as usize] |= 1 << c.rank_index();
            }
            let mask = suit_binary
                .get(flush_suit as usize - 1)
                .copied()
                .ok_or(EvalError::MalformedHand)?;
            self.flush
                .get(mask as usize)
                .copied()
                .ok_or(EvalError::MalformedHand)?
        } else {
            let mut quinary = [0u8; RANKS];
            for c in cards.iter() {
                quinary[c.rank_index() as usize] += 1;
            }
            if quinary.iter().any(|&q| q as usize >= DP_COUNTS) {
                return Err(EvalError::MalformedHand);
            }
            self.noflush
                .get(hash_quinary(&self.dp, &quinary, 5))
                .copied()
                .ok_or(EvalError::MalformedHand)?
        };

        if score == 0 {
            return Err(EvalError::MalformedHand);
        }
        Ok(RankScore(score))
    }

    /// Сырые значения таблицы (для выгрузки батчами).
    pub fn raw(&self, kind: TableKind) -> Vec<u32> {
        match kind {
            TableKind::Suits => self.suits.iter().map(|&v| v as u32).collect(),
            TableKind::Flush => self.flush.iter().map(|&v| v as u32).collect(),
            TableKind::NoFlush => self.noflush.iter().map(|&v| v as u32).collect(),
            TableKind::Dp => self.dp.clone(),
        }
    }
}

/// Quinary-hash: идём от туза к двойке, прибавляем dp[count][ranks_left][cards_left],
/// уменьшаем бюджет карт и останавливаемся на нуле.
///
/// Результат – плотный индекс вектора среди всех векторов с суммой `k`.
pub fn hash_quinary(dp: &[u32], counts: &[u8; RANKS], k: usize) -> usize {
    let mut sum = 0usize;
    let mut left = k;
    for rank in (0..RANKS).rev() {
        let q = counts[rank] as usize;
        sum += dp[dp_index(q, rank, left)] as usize;
        left = left.saturating_sub(q);
        if left == 0 {
            break;
        }
    }
    sum
}

/// dp[q][n][k] = число векторов длины n (цифры 0..4) с суммой k - x, по всем x < q.
fn build_dp() -> Vec<u32> {
    // ways[n][k]: векторов длины n с суммой k
    let mut ways = [[0u32; DP_CARDS]; DP_RANKS];
    ways[0][0] = 1;
    for n in 1..DP_RANKS {
        for k in 0..DP_CARDS {
            let prev = ways[n - 1];
            ways[n][k] = (0..DP_COUNTS.min(k + 1)).map(|x| prev[k - x]).sum();
        }
    }

    let mut dp = vec![0u32; DP_TABLE_SIZE];
    for q in 1..DP_COUNTS {
        for n in 0..DP_RANKS {
            for k in 0..DP_CARDS {
                let below = if k + 1 >= q { ways[n][k + 1 - q] } else { 0 };
                dp[dp_index(q, n, k)] = dp[dp_index(q - 1, n, k)] + below;
            }
        }
    }
    dp
}

/// Suit-hash = сумма `1 << (suit * 3)`; флеш ⇔ одно из 3-битных полей равно 5.
fn build_suits() -> Vec<u8> {
    let mut suits = vec![0u8; SUIT_TABLE_SIZE];
    for c in 0..=5usize {
        for d in 0..=(5 - c) {
            for h in 0..=(5 - c - d) {
                let s = 5 - c - d - h;
                let counts = [c, d, h, s];
                if let Some(flush_suit) = counts.iter().position(|&n| n == 5) {
                    let hash = c + (d << 3) + (h << 6) + (s << 9);
                    suits[hash] = flush_suit as u8 + 1;
                }
            }
        }
    }
    suits
}

/// Все маски из 5 разных рангов в порядке убывания (лексикографически от старших).
fn distinct_masks_desc() -> Vec<RankMask> {
    let mut out = Vec::with_capacity(1287);
    for a in (4..RANKS).rev() {
        for b in (3..a).rev() {
            for c in (2..b).rev() {
                for d in (1..c).rev() {
                    for e in (0..d).rev() {
                        out.push(mask_from_indices(&[a as u8, b as u8, c as u8, d as u8, e as u8]));
                    }
                }
            }
        }
    }
    out
}

fn counts_of(pairs: &[(usize, u8)]) -> [u8; RANKS] {
    let mut counts = [0u8; RANKS];
    for &(rank, n) in pairs {
        counts[rank] += n;
    }
    counts
}

fn counts_from_mask(mask: RankMask) -> [u8; RANKS] {
    let mut counts = [0u8; RANKS];
    for (rank, slot) in counts.iter_mut().enumerate() {
        if mask & (1 << rank) != 0 {
            *slot = 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quinary_hash_is_dense_and_collision_free() {
        let dp = build_dp();
        let mut seen = vec![false; NOFLUSH_TABLE_SIZE];
        let mut total = 0;
        // перебираем все векторы количеств с суммой 5 и count <= 4
        fn walk(rank: usize, left: u8, counts: &mut [u8; RANKS], f: &mut dyn FnMut(&[u8; RANKS])) {
            if rank == RANKS {
                if left == 0 {
                    f(counts);
                }
                return;
            }
            for q in 0..=left.min(4) {
                counts[rank] = q;
                walk(rank + 1, left - q, counts, f);
            }
            counts[rank] = 0;
        }
        let mut counts = [0u8; RANKS];
        walk(0, 5, &mut counts, &mut |c| {
            let h = hash_quinary(&dp, c, 5);
            assert!(h < NOFLUSH_TABLE_SIZE);
            assert!(!seen[h], "collision at {h}");
            seen[h] = true;
            total += 1;
        });
        assert_eq!(total, NOFLUSH_TABLE_SIZE);
    }

    #[test]
    fn every_noflush_slot_gets_a_score() {
        let t = EvaluatorTables::generate();
        assert!(t.noflush.iter().all(|&s| s != 0));
        assert_eq!(t.flush.iter().filter(|&&s| s != 0).count(), 1287);
    }
}
