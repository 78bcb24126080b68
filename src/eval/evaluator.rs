use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, RwLock};

use crate::domain::card::CardId;
use crate::domain::chips::Chips;
use crate::domain::hand::RankScore;
use crate::domain::PlayerId;

use super::errors::EvalError;
use super::hand_rank::HandCategory;
use super::lookup_tables::EvaluatorTables;

/// Эвалюатор 5-карточных рук с белым списком вызывающих.
///
/// Сама оценка – чистая функция над `EvaluatorTables`; доступ к ней
/// проверяется до вычисления. Попасть в список можно двумя путями:
/// владелец выдаёт доступ (`grant_access`) или вызывающий оплачивает
/// подписку (`subscribe`).
#[derive(Debug)]
pub struct HandEvaluator {
    tables: Arc<EvaluatorTables>,
    owner: PlayerId,
    subscription_price: Chips,
    authorized: RwLock<BTreeSet<PlayerId>>,
    earnings: Mutex<Chips>,
}

impl HandEvaluator {
    pub fn new(tables: Arc<EvaluatorTables>, owner: PlayerId, subscription_price: Chips) -> Self {
        Self {
            tables,
            owner,
            subscription_price,
            authorized: RwLock::new(BTreeSet::new()),
            earnings: Mutex::new(Chips::ZERO),
        }
    }

    /// Эвалюатор со свежесгенерированными таблицами.
    pub fn with_generated_tables(owner: PlayerId, subscription_price: Chips) -> Self {
        Self::new(Arc::new(EvaluatorTables::generate()), owner, subscription_price)
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn subscription_price(&self) -> Chips {
        self.subscription_price
    }

    pub fn tables(&self) -> &Arc<EvaluatorTables> {
        &self.tables
    }

    pub fn has_access(&self, caller: PlayerId) -> Result<bool, EvalError> {
        if caller == self.owner {
            return Ok(true);
        }
        let list = self.authorized.read().map_err(|_| EvalError::Poisoned)?;
        Ok(list.contains(&caller))
    }

    pub fn grant_access(&self, caller: PlayerId, grantee: PlayerId) -> Result<(), EvalError> {
        if caller != self.owner {
            return Err(EvalError::NotOwner);
        }
        self.authorized
            .write()
            .map_err(|_| EvalError::Poisoned)?
            .insert(grantee);
        tracing::info!(grantee, "evaluator access granted");
        Ok(())
    }

    pub fn revoke_access(&self, caller: PlayerId, grantee: PlayerId) -> Result<(), EvalError> {
        if caller != self.owner {
            return Err(EvalError::NotOwner);
        }
        self.authorized
            .write()
            .map_err(|_| EvalError::Poisoned)?
            .remove(&grantee);
        tracing::info!(grantee, "evaluator access revoked");
        Ok(())
    }

    /// Платная подписка: оплата должна точно совпасть с ценой.
    pub fn subscribe(&self, caller: PlayerId, payment: Chips) -> Result<(), EvalError> {
        if payment != self.subscription_price {
            return Err(EvalError::IncorrectPayment {
                expected: self.subscription_price.0,
                got: payment.0,
            });
        }
        let mut earnings = self.earnings.lock().map_err(|_| EvalError::Poisoned)?;
        self.authorized
            .write()
            .map_err(|_| EvalError::Poisoned)?
            .insert(caller);
        *earnings += payment;
        tracing::info!(subscriber = caller, %payment, "evaluator subscription paid");
        Ok(())
    }

    /// Забрать накопленные подписки (только владелец).
    pub fn withdraw_earnings(&self, caller: PlayerId) -> Result<Chips, EvalError> {
        if caller != self.owner {
            return Err(EvalError::NotOwner);
        }
        let mut earnings = self.earnings.lock().map_err(|_| EvalError::Poisoned)?;
        if earnings.is_zero() {
            return Err(EvalError::NothingToWithdraw);
        }
        let amount = *earnings;
        *earnings = Chips::ZERO;
        Ok(amount)
    }

    /// Оценить 5 карт. Меньше = сильнее.
    pub fn evaluate(&self, caller: PlayerId, cards: [CardId; 5]) -> Result<RankScore, EvalError> {
        if !self.has_access(caller)? {
            return Err(EvalError::AccessDenied(caller));
        }
        self.tables.score_five(cards)
    }

    /// Оценка + категория одним вызовом.
    pub fn evaluate_with_category(
        &self,
        caller: PlayerId,
        cards: [CardId; 5],
    ) -> Result<(RankScore, HandCategory), EvalError> {
        let score = self.evaluate(caller, cards)?;
        let category = HandCategory::from_score(score).ok_or(EvalError::MalformedHand)?;
        Ok((score, category))
    }
}
