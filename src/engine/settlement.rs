//! Расчёт банка и книга выплат.
//!
//! Расчёт (`plan`) – чистая функция: сколько дому, сколько каждому игроку.
//! Деньги никому не переводятся напрямую: суммы зачисляются в `Ledger`,
//! откуда каждый забирает своё отдельным `withdraw`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::config::SplitConfig;
use crate::domain::PlayerId;
use crate::engine::errors::EngineError;
use crate::engine::leaderboard::LeaderboardEntry;

/// Итог расчёта одной игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementPlan {
    pub total_paid_in: Chips,
    /// `total * house_cut_bps / 10000`.
    pub house_cut: Chips,
    /// Банк после комиссии.
    pub claim_pot: Chips,
    pub winner_share_each: Chips,
    pub runner_up_share_each: Chips,
    /// Зачисления игрокам в порядке лидерборда.
    pub credits: Vec<(PlayerId, Chips)>,
    /// Всё, что не ушло игрокам: комиссия + все остатки от деления.
    pub house_take: Chips,
}

impl SettlementPlan {
    pub fn credited_total(&self) -> Chips {
        self.credits.iter().map(|(_, c)| *c).sum()
    }
}

/// Разделить банк между лидербордом и домом.
///
/// Победители – все записи с лучшим score, остальные – runner-up'ы.
/// `entries` ожидаются уже отсортированными (как в `Leaderboard`).
pub fn plan(total_paid_in: Chips, entries: &[LeaderboardEntry], split: &SplitConfig) -> SettlementPlan {
    let house_cut = total_paid_in.basis_points(split.house_cut_bps);
    let claim_pot = total_paid_in - house_cut;

    let n_winners = entries
        .first()
        .map_or(0, |best| entries.iter().take_while(|e| e.score == best.score).count());
    let (winners, runner_ups) = entries.split_at(n_winners);

    let (winner_share_each, _) = claim_pot.percent(split.winner_pct).split_even(winners.len());
    let (runner_up_share_each, _) = claim_pot
        .percent(split.runner_up_pct)
        .split_even(runner_ups.len());

    let mut credits = Vec::with_capacity(entries.len());
    for e in winners {
        credits.push((e.player_id, winner_share_each));
    }
    for e in runner_ups {
        credits.push((e.player_id, runner_up_share_each));
    }

    let credited: Chips = credits.iter().map(|(_, c)| *c).sum();
    SettlementPlan {
        total_paid_in,
        house_cut,
        claim_pot,
        winner_share_each,
        runner_up_share_each,
        credits,
        house_take: total_paid_in - credited,
    }
}

/// Балансы к выводу: по игрокам и у дома.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ledger {
    balances: BTreeMap<PlayerId, Chips>,
    house: Chips,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, player_id: PlayerId) -> Chips {
        self.balances.get(&player_id).copied().unwrap_or(Chips::ZERO)
    }

    pub fn house_balance(&self) -> Chips {
        self.house
    }

    pub fn balances(&self) -> &BTreeMap<PlayerId, Chips> {
        &self.balances
    }

    pub fn credit(&mut self, player_id: PlayerId, amount: Chips) -> Result<(), EngineError> {
        if amount.is_zero() {
            return Ok(());
        }
        let slot = self.balances.entry(player_id).or_insert(Chips::ZERO);
        *slot = slot.checked_add(amount).ok_or(EngineError::Overflow)?;
        Ok(())
    }

    pub fn credit_house(&mut self, amount: Chips) -> Result<(), EngineError> {
        self.house = self.house.checked_add(amount).ok_or(EngineError::Overflow)?;
        Ok(())
    }

    /// Применить расчёт целиком. Сначала проверяем переполнения, потом пишем.
    pub fn apply(&mut self, plan: &SettlementPlan) -> Result<(), EngineError> {
        let mut staged = self.clone();
        for (player, amount) in &plan.credits {
            staged.credit(*player, *amount)?;
        }
        staged.credit_house(plan.house_take)?;
        *self = staged;
        Ok(())
    }

    /// Вывести весь баланс игрока: сначала обнуляем, потом отдаём сумму.
    pub fn withdraw(&mut self, player_id: PlayerId) -> Result<Chips, EngineError> {
        let amount = self.balance(player_id);
        if amount.is_zero() {
            return Err(EngineError::NothingToWithdraw);
        }
        self.balances.remove(&player_id);
        Ok(amount)
    }

    pub fn withdraw_house(&mut self) -> Result<Chips, EngineError> {
        if self.house.is_zero() {
            return Err(EngineError::NothingToWithdraw);
        }
        let amount = self.house;
        self.house = Chips::ZERO;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hand::RankScore;
    use crate::eval::HandCategory;

    fn entry(player_id: PlayerId, score: u16) -> LeaderboardEntry {
        LeaderboardEntry {
            player_id,
            score: RankScore(score),
            category: HandCategory::HighCard,
        }
    }

    #[test]
    fn lone_winner_leaves_runner_up_share_to_house() {
        let split = SplitConfig {
            house_cut_bps: 1_000,
            winner_pct: 70,
            runner_up_pct: 30,
        };
        let p = plan(Chips(1_000), &[entry(7, 100)], &split);
        assert_eq!(p.house_cut, Chips(100));
        assert_eq!(p.credits, vec![(7, Chips(630))]);
        assert_eq!(p.house_take, Chips(370));
    }

    #[test]
    fn empty_board_sends_everything_to_house() {
        let p = plan(Chips(77), &[], &SplitConfig::default());
        assert!(p.credits.is_empty());
        assert_eq!(p.house_take, Chips(77));
    }
}
