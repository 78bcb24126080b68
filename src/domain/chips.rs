use core::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Денежная сумма в минимальных единицах. Обёртка над u64, чтобы не путать с обычными числами.
///
/// Все деления – целочисленные с отбрасыванием остатка; остатки
/// возвращаются вызывающему явно, чтобы их можно было направить дому.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chips(pub u64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    pub fn new(amount: u64) -> Self {
        Chips(amount)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Безопасное вычитание, не даёт уйти в минус.
    pub fn saturating_sub(self, other: Chips) -> Chips {
        Chips(self.0.saturating_sub(other.0))
    }

    pub fn checked_add(self, other: Chips) -> Option<Chips> {
        self.0.checked_add(other.0).map(Chips)
    }

    pub fn checked_sub(self, other: Chips) -> Option<Chips> {
        self.0.checked_sub(other.0).map(Chips)
    }

    /// `self * bps / 10_000` с отбрасыванием остатка.
    /// Считаем в u128, чтобы произведение не переполнялось.
    pub fn basis_points(self, bps: u32) -> Chips {
        Chips(((self.0 as u128 * bps as u128) / 10_000) as u64)
    }

    /// `self * pct / 100` с отбрасыванием остатка.
    pub fn percent(self, pct: u8) -> Chips {
        Chips(((self.0 as u128 * pct as u128) / 100) as u64)
    }

    /// Делим поровну на `parts` получателей: (доля каждого, неделимый остаток).
    /// Для `parts == 0` вся сумма – остаток.
    pub fn split_even(self, parts: usize) -> (Chips, Chips) {
        if parts == 0 {
            return (Chips::ZERO, self);
        }
        let parts = parts as u64;
        (Chips(self.0 / parts), Chips(self.0 % parts))
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Chips {
    type Output = Chips;

    fn sub(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl core::iter::Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}

impl core::fmt::Display for Chips {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
