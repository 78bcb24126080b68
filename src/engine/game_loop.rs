use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::card::CardId;
use crate::domain::chips::Chips;
use crate::domain::deck::GameDeck;
use crate::domain::game::{GameParams, GameStatus};
use crate::domain::hand::{FinalHand, RankScore, Round};
use crate::domain::player::PlayerRoundRecord;
use crate::domain::{GameId, PlayerId, RequestId, Timestamp, TokenId};
use crate::engine::errors::EngineError;
use crate::engine::leaderboard::Leaderboard;
use crate::engine::pot::Pot;
use crate::eval::HandCategory;
use crate::time_ctrl::{RoundClock, RoundPhase};

/// Чем закончится `end_game` для игры в текущий момент.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EndOutcome {
    /// Никто не платил: просто удаляем.
    Delete,
    /// Игра не доиграна: каждый забирает свой взнос через `claim_refund`.
    Refund,
    /// Нормальный финал: делим банк.
    Settle,
}

/// Состояние одной игры (один экземпляр машины состояний).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    pub id: GameId,
    pub status: GameStatus,
    pub params: GameParams,
    pub clock: RoundClock,
    /// Неисполненный запрос случайности (не больше одного на игру).
    pub active_request: Option<RequestId>,
    /// Общие карты в порядке открытия: 3 флопа, тёрн, ривер.
    pub community: Vec<CardId>,
    pub deck: GameDeck,
    pub pot: Pot,
    pub players_acted_this_round: u32,
    pub refundable: bool,
    /// Сколько вкладчиков ещё не забрали возврат.
    pub pending_refunds: u32,
    pub records: BTreeMap<PlayerId, PlayerRoundRecord>,
    /// NFT, уже использованные в раунде любым игроком.
    pub used_tokens: BTreeMap<Round, BTreeSet<TokenId>>,
    pub leaderboard: Leaderboard,
}

impl Game {
    /// Новая игра сразу ждёт флоп.
    pub fn new(id: GameId, params: GameParams, request_id: RequestId, now: Timestamp) -> Self {
        let mut clock = RoundClock::new();
        clock.restart(now, &params.rules);
        Self {
            id,
            status: GameStatus::FlopWait,
            params,
            clock,
            active_request: Some(request_id),
            community: Vec::with_capacity(5),
            deck: GameDeck::full(),
            pot: Pot::new(),
            players_acted_this_round: 0,
            refundable: false,
            pending_refunds: 0,
            records: BTreeMap::new(),
            used_tokens: BTreeMap::new(),
            leaderboard: Leaderboard::new(),
        }
    }

    pub fn total_paid_in(&self) -> Chips {
        self.pot.total
    }

    pub fn round_end_time(&self) -> Timestamp {
        self.clock.round_end_time
    }

    pub fn record(&self, player_id: PlayerId) -> Option<&PlayerRoundRecord> {
        self.records.get(&player_id)
    }

    pub fn token_used(&self, round: Round, token_id: TokenId) -> bool {
        self.used_tokens
            .get(&round)
            .map_or(false, |set| set.contains(&token_id))
    }

    /// Сумма взносов по записям игроков (с учётом уже возвращённого) совпадает с банком.
    pub fn paid_in_consistent(&self) -> bool {
        let recorded: Chips = self.records.values().map(|r| r.paid_in).sum();
        recorded == self.pot.outstanding()
    }

    /// Игра в refund-режиме больше не играется.
    pub fn ensure_playable(&self) -> Result<(), EngineError> {
        if self.refundable {
            return Err(EngineError::GameRefundable(self.id));
        }
        Ok(())
    }

    /// Раунд `round` открыт на столе и его окно действий ещё не закрылось.
    pub fn ensure_round_open(&self, round: Round, now: Timestamp) -> Result<(), EngineError> {
        if self.status != GameStatus::dealt(round) {
            return Err(EngineError::WrongRound(self.status));
        }
        if !self.clock.is_open(now) {
            return Err(EngineError::RoundOver);
        }
        Ok(())
    }

    /// Ушёл запрос на раздачу `round`.
    pub fn begin_request(&mut self, round: Round, request_id: RequestId, now: Timestamp) {
        self.status = GameStatus::waiting_for(round);
        self.active_request = Some(request_id);
        self.players_acted_this_round = 0;
        self.clock.restart(now, &self.params.rules);
    }

    /// Открыть карты раунда из случайного значения.
    pub fn apply_deal(&mut self, round: Round, value: u128, now: Timestamp) -> Vec<CardId> {
        let cards = self.deck.draw_from_random(value, round.cards_dealt());
        self.community.extend_from_slice(&cards);
        self.status = GameStatus::dealt(round);
        self.active_request = None;
        self.players_acted_this_round = 0;
        self.clock.restart(now, &self.params.rules);
        cards
    }

    /// Записать оплаченную отправку NFT.
    pub fn record_submission(
        &mut self,
        player_id: PlayerId,
        round: Round,
        token_id: TokenId,
        fee: Chips,
    ) -> Result<(), EngineError> {
        self.pot.add(fee)?;
        self.records
            .entry(player_id)
            .or_insert_with(|| PlayerRoundRecord::new(player_id))
            .record_submission(round, token_id, fee);
        self.used_tokens.entry(round).or_default().insert(token_id);
        self.players_acted_this_round += 1;
        Ok(())
    }

    /// Сохранить итоговую руку и поставить игрока в лидерборд.
    pub fn store_final_hand(
        &mut self,
        player_id: PlayerId,
        hand: FinalHand,
        category: HandCategory,
    ) -> Result<Option<usize>, EngineError> {
        let score: RankScore = hand.score;
        let record = self
            .records
            .get_mut(&player_id)
            .ok_or(EngineError::Internal("final hand without player record"))?;
        record.final_hand = Some(hand);
        Ok(self.leaderboard.insert(player_id, score, category))
    }

    /// Что сделает `end_game` сейчас. Ошибка – если завершать рано.
    pub fn end_outcome(&self, now: Timestamp) -> Result<EndOutcome, EngineError> {
        self.ensure_playable()?;

        let river_done = self.status == GameStatus::RiverDealt && self.clock.has_ended(now);
        let stale = self.status != GameStatus::RiverDealt
            && self.clock.phase(now, &self.params.rules) == RoundPhase::Stale;

        if !river_done && !stale {
            return Err(EngineError::CannotEndGame);
        }
        if self.pot.total.is_zero() {
            return Ok(EndOutcome::Delete);
        }
        if stale || self.leaderboard.is_empty() {
            return Ok(EndOutcome::Refund);
        }
        Ok(EndOutcome::Settle)
    }

    /// Перевести игру в refund-режим.
    pub fn mark_refundable(&mut self) {
        self.refundable = true;
        self.active_request = None;
        self.pending_refunds = self
            .records
            .values()
            .filter(|r| !r.paid_in.is_zero())
            .count() as u32;
    }

    /// Сколько должно вернуться игроку.
    pub fn refund_due(&self, player_id: PlayerId) -> Result<Chips, EngineError> {
        if !self.refundable {
            return Err(EngineError::NotRefundable(self.id));
        }
        match self.records.get(&player_id) {
            Some(r) if !r.paid_in.is_zero() => Ok(r.paid_in),
            _ => Err(EngineError::NothingToRefund),
        }
    }

    /// Обнулить взнос игрока и вернуть сумму.
    pub fn take_refund(&mut self, player_id: PlayerId) -> Result<Chips, EngineError> {
        let amount = self.refund_due(player_id)?;
        self.pot.refund(amount)?;
        if let Some(r) = self.records.get_mut(&player_id) {
            r.paid_in = Chips::ZERO;
        }
        self.pending_refunds = self.pending_refunds.saturating_sub(1);
        Ok(amount)
    }
}
