use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::engine::errors::EngineError;

/// Банк игры: сколько всего внесено (`totalPaidIn`) и сколько уже возвращено.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
    /// Сумма уже выданных возвратов (на refund-пути).
    pub refunded: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self {
            total: Chips::ZERO,
            refunded: Chips::ZERO,
        }
    }

    pub fn add(&mut self, amount: Chips) -> Result<(), EngineError> {
        self.total = self.total.checked_add(amount).ok_or(EngineError::Overflow)?;
        Ok(())
    }

    /// Отметить возврат части банка. Возврат больше остатка – ошибка учёта.
    pub fn refund(&mut self, amount: Chips) -> Result<(), EngineError> {
        let after = self
            .refunded
            .checked_add(amount)
            .filter(|r| *r <= self.total)
            .ok_or(EngineError::Internal("refund exceeds pot"))?;
        self.refunded = after;
        Ok(())
    }

    /// Сколько ещё не возвращено.
    pub fn outstanding(&self) -> Chips {
        self.total - self.refunded
    }
}
