//! `PokerArena` – фасад движка: реестр игр, эвалюатор, книга выплат, роли и журнал событий.
//!
//! Все операции синхронные и атомарные: сначала полная проверка, потом мутация.
//! Текущее время и платёж передаёт вызывающий, часов и кошелька внутри нет.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::card::CardId;
use crate::domain::chips::Chips;
use crate::domain::config::{ArenaConfig, ConfigError, OracleConfig};
use crate::domain::game::{GameParams, GameStatus};
use crate::domain::hand::{FinalHand, RankScore, Round};
use crate::domain::{GameId, PlayerId, RequestId, Timestamp, TokenId};
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, GameEventKind};
use crate::engine::game_loop::{EndOutcome, Game};
use crate::engine::game_registry::GameRegistry;
use crate::engine::settlement::{self, Ledger};
use crate::engine::validation;
use crate::engine::{AssetRegistry, RandomnessClient};
use crate::eval::HandEvaluator;
use crate::infra::rng_seed::RngSeed;
use crate::state::ArenaSnapshot;
use crate::time_ctrl::TimeRules;

pub struct PokerArena<R: RandomnessClient, A: AssetRegistry> {
    /// Адрес самой арены (под ним она вызывает эвалюатор).
    self_id: PlayerId,
    owner: PlayerId,
    config: ArenaConfig,
    registry: GameRegistry,
    ledger: Ledger,
    dealers: BTreeSet<PlayerId>,
    evaluator: Arc<HandEvaluator>,
    randomness: R,
    assets: A,
    events: EventLog,
    /// Счётчик запросов случайности (входит в seed).
    request_nonce: u64,
}

impl<R: RandomnessClient, A: AssetRegistry> PokerArena<R, A> {
    pub fn new(
        self_id: PlayerId,
        owner: PlayerId,
        config: ArenaConfig,
        evaluator: Arc<HandEvaluator>,
        randomness: R,
        assets: A,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        tracing::info!(self_id, owner, max_games = config.max_games, "arena created");
        let events = EventLog::with_capacity(config.event_log_capacity);
        Ok(Self {
            self_id,
            owner,
            registry: GameRegistry::new(config.max_games),
            config,
            ledger: Ledger::new(),
            dealers: BTreeSet::new(),
            evaluator,
            randomness,
            assets,
            events,
            request_nonce: 0,
        })
    }

    /// Поднять арену из снапшота.
    pub fn restore(
        snapshot: ArenaSnapshot,
        evaluator: Arc<HandEvaluator>,
        randomness: R,
        assets: A,
    ) -> Result<Self, ConfigError> {
        snapshot.config.validate()?;
        let registry = GameRegistry::from_parts(
            snapshot.games,
            snapshot.pending_requests,
            snapshot.next_game_id,
            snapshot.config.max_games,
        );
        tracing::info!(
            games = registry.active_count(),
            next_game_id = snapshot.next_game_id,
            "arena restored"
        );
        Ok(Self {
            self_id: snapshot.self_id,
            owner: snapshot.owner,
            config: snapshot.config,
            registry,
            ledger: snapshot.ledger,
            dealers: snapshot.dealers.into_iter().collect(),
            evaluator,
            randomness,
            assets,
            events: snapshot.events,
            request_nonce: snapshot.request_nonce,
        })
    }

    /// Снимок всего изменяемого состояния (без эвалюатора и внешних клиентов).
    pub fn snapshot(&self) -> ArenaSnapshot {
        ArenaSnapshot {
            self_id: self.self_id,
            owner: self.owner,
            config: self.config.clone(),
            games: self.registry.games().cloned().collect(),
            pending_requests: self.registry.pending_requests(),
            next_game_id: self.registry.next_game_id(),
            ledger: self.ledger.clone(),
            dealers: self.dealers.iter().copied().collect(),
            events: self.events.clone(),
            request_nonce: self.request_nonce,
        }
    }

    // ---------------------------------------------------------------------
    // Геттеры
    // ---------------------------------------------------------------------

    pub fn self_id(&self) -> PlayerId {
        self.self_id
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn registry(&self) -> &GameRegistry {
        &self.registry
    }

    pub fn game(&self, game_id: GameId) -> Result<&Game, EngineError> {
        self.registry.game(game_id)
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn balance(&self, player_id: PlayerId) -> Chips {
        self.ledger.balance(player_id)
    }

    pub fn house_balance(&self) -> Chips {
        self.ledger.house_balance()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn evaluator(&self) -> &Arc<HandEvaluator> {
        &self.evaluator
    }

    pub fn randomness(&self) -> &R {
        &self.randomness
    }

    pub fn randomness_mut(&mut self) -> &mut R {
        &mut self.randomness
    }

    pub fn assets(&self) -> &A {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut A {
        &mut self.assets
    }

    /// Дилер – владелец или адрес с выданной ролью.
    pub fn is_dealer(&self, who: PlayerId) -> bool {
        who == self.owner || self.dealers.contains(&who)
    }

    fn ensure_owner(&self, caller: PlayerId) -> Result<(), EngineError> {
        if caller != self.owner {
            return Err(EngineError::Unauthorized(caller));
        }
        Ok(())
    }

    fn default_params(&self) -> GameParams {
        GameParams {
            rules: TimeRules::new(self.config.round_seconds, self.config.stale_grace_seconds),
            flop_price: self.config.flop_price,
            turn_price: self.config.turn_price,
        }
    }

    /// Запросить случайность у оракула. Nonce растёт только при успехе.
    fn request_randomness(&mut self, game_id: GameId, round: Round) -> Result<RequestId, EngineError> {
        let seed = RngSeed::for_request(game_id, round, self.request_nonce);
        let oracle = &self.config.oracle;
        let request_id = self
            .randomness
            .request_randomness(oracle.key_hash, oracle.fee, &seed)?;
        self.request_nonce += 1;
        Ok(request_id)
    }

    // ---------------------------------------------------------------------
    // Жизненный цикл игры
    // ---------------------------------------------------------------------

    /// Завести игру с параметрами из конфига.
    pub fn start_game(&mut self, caller: PlayerId, now: Timestamp) -> Result<GameId, EngineError> {
        let params = self.default_params();
        self.launch(caller, params, now)
    }

    /// Завести игру со своими длиной раунда и ценами (только дилер).
    pub fn start_custom_game(
        &mut self,
        caller: PlayerId,
        round_seconds: u64,
        flop_price: Chips,
        turn_price: Chips,
        now: Timestamp,
    ) -> Result<GameId, EngineError> {
        if round_seconds == 0 || flop_price.is_zero() || turn_price.is_zero() {
            return Err(EngineError::InvalidGameParams);
        }
        if !self.is_dealer(caller) {
            return Err(EngineError::NotDealer(caller));
        }
        let params = GameParams {
            rules: TimeRules::new(round_seconds, self.config.stale_grace_seconds),
            flop_price,
            turn_price,
        };
        self.launch(caller, params, now)
    }

    fn launch(
        &mut self,
        caller: PlayerId,
        params: GameParams,
        now: Timestamp,
    ) -> Result<GameId, EngineError> {
        if !self.registry.can_start() {
            return Err(EngineError::TooManyGames);
        }
        let upcoming = self.registry.next_game_id();
        let request_id = self.request_randomness(upcoming, Round::Flop)?;
        let game_id = self.registry.create_game(params.clone(), request_id, now)?;

        self.events.push(GameEventKind::GameStarted {
            game_id,
            round_secs: params.rules.round_secs,
            flop_price: params.flop_price,
            turn_price: params.turn_price,
        });
        self.events.push(GameEventKind::CardDealRequested {
            game_id,
            round: Round::Flop,
            request_id,
        });
        tracing::info!(
            game_id,
            caller,
            request_id,
            round_secs = params.rules.round_secs,
            "game started, flop requested"
        );
        Ok(game_id)
    }

    /// Колбэк оракула. `Ok(false)` – запрос неизвестен или уже неактуален.
    pub fn fulfill_randomness(
        &mut self,
        caller: PlayerId,
        request_id: RequestId,
        value: u128,
        now: Timestamp,
    ) -> Result<bool, EngineError> {
        if caller != self.config.oracle.coordinator {
            return Err(EngineError::Unauthorized(caller));
        }
        let Some(pending) = self.registry.take_request(request_id) else {
            tracing::warn!(request_id, "fulfilment for unknown request ignored");
            return Ok(false);
        };
        let Ok(game) = self.registry.game_mut(pending.game_id) else {
            tracing::warn!(request_id, game_id = pending.game_id, "fulfilment for deleted game ignored");
            return Ok(false);
        };
        let expected = GameStatus::waiting_for(pending.round);
        if game.refundable || game.active_request != Some(request_id) || game.status != expected {
            tracing::warn!(
                request_id,
                game_id = pending.game_id,
                status = ?game.status,
                "stale fulfilment ignored"
            );
            return Ok(false);
        }

        let cards = game.apply_deal(pending.round, value, now);
        for card in &cards {
            self.events.push(GameEventKind::CardDealt {
                game_id: pending.game_id,
                round: pending.round,
                card: *card,
            });
        }
        let shown: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
        tracing::info!(
            game_id = pending.game_id,
            round = ?pending.round,
            cards = ?shown,
            "community cards dealt"
        );
        Ok(true)
    }

    /// Отправить NFT в раунд флопа.
    pub fn add_nft_flop(
        &mut self,
        caller: PlayerId,
        token_id: TokenId,
        game_id: GameId,
        payment: Chips,
        now: Timestamp,
    ) -> Result<(), EngineError> {
        self.add_nft(caller, token_id, game_id, Round::Flop, payment, now)
    }

    /// Отправить NFT в раунд тёрна (он должен был участвовать во флопе).
    pub fn add_nft_turn(
        &mut self,
        caller: PlayerId,
        token_id: TokenId,
        game_id: GameId,
        payment: Chips,
        now: Timestamp,
    ) -> Result<(), EngineError> {
        self.add_nft(caller, token_id, game_id, Round::Turn, payment, now)
    }

    fn add_nft(
        &mut self,
        caller: PlayerId,
        token_id: TokenId,
        game_id: GameId,
        round: Round,
        payment: Chips,
        now: Timestamp,
    ) -> Result<(), EngineError> {
        let game = self.registry.game(game_id)?;
        validation::validate_submission(game, &self.assets, caller, token_id, round, payment, now)?;

        let game = self.registry.game_mut(game_id)?;
        game.record_submission(caller, round, token_id, payment)?;
        let acted = game.players_acted_this_round;

        self.events.push(GameEventKind::HandAdded {
            game_id,
            round,
            player_id: caller,
            token_id,
        });
        self.events.push(GameEventKind::FeePaid {
            game_id,
            player_id: caller,
            amount: payment,
        });
        tracing::debug!(game_id, player = caller, token_id, ?round, %payment, acted, "hand added");
        Ok(())
    }

    /// Дилер запрашивает карты следующего раунда после конца текущего.
    pub fn request_deal(
        &mut self,
        caller: PlayerId,
        game_id: GameId,
        now: Timestamp,
    ) -> Result<RequestId, EngineError> {
        let game = self.registry.game(game_id)?;
        game.ensure_playable()?;
        let next = game
            .status
            .dealt_round()
            .and_then(Round::next)
            .ok_or(EngineError::NotTimeToDeal)?;
        if !game.clock.has_ended(now) {
            return Err(EngineError::CannotRequestDealYet);
        }
        if !self.is_dealer(caller) {
            return Err(EngineError::NotDealer(caller));
        }

        let request_id = self.request_randomness(game_id, next)?;
        self.registry.game_mut(game_id)?.begin_request(next, request_id, now);
        self.registry.register_request(request_id, game_id, next);

        self.events.push(GameEventKind::CardDealRequested {
            game_id,
            round: next,
            request_id,
        });
        tracing::info!(game_id, dealer = caller, request_id, round = ?next, "deal requested");
        Ok(request_id)
    }

    /// Сыграть итоговую руку: 2 карманные + 3 выбранные общие.
    pub fn play_final_hand(
        &mut self,
        caller: PlayerId,
        token_id: TokenId,
        chosen: [CardId; 3],
        game_id: GameId,
        now: Timestamp,
    ) -> Result<RankScore, EngineError> {
        let game = self.registry.game(game_id)?;
        let cards =
            validation::validate_final_hand(game, &self.assets, caller, token_id, chosen, now)?;
        let (score, category) = self.evaluator.evaluate_with_category(self.self_id, cards)?;

        let game = self.registry.game_mut(game_id)?;
        let position = game.store_final_hand(
            caller,
            FinalHand {
                token_id,
                cards,
                score,
            },
            category,
        )?;

        self.events.push(GameEventKind::FinalHandPlayed {
            game_id,
            player_id: caller,
            cards,
            score,
            category,
        });
        tracing::info!(
            game_id,
            player = caller,
            score = score.0,
            ?category,
            position = ?position,
            "final hand played"
        );
        Ok(score)
    }

    /// Завершить игру (кто угодно): удалить, перевести в возвраты или рассчитать.
    pub fn end_game(
        &mut self,
        caller: PlayerId,
        game_id: GameId,
        now: Timestamp,
    ) -> Result<EndOutcome, EngineError> {
        let game = self.registry.game(game_id)?;
        let outcome = game.end_outcome(now)?;

        match outcome {
            EndOutcome::Delete => {
                self.registry.remove(game_id);
                self.events.push(GameEventKind::GameDeleted { game_id });
                tracing::info!(game_id, caller, "empty game deleted");
            }
            EndOutcome::Refund => {
                let game = self.registry.game_mut(game_id)?;
                game.mark_refundable();
                let contributors = game.pending_refunds;
                self.registry.forget_requests(game_id);
                self.events.push(GameEventKind::RefundableGame { game_id });
                tracing::warn!(game_id, caller, contributors, "game is refundable");
            }
            EndOutcome::Settle => {
                let game = self.registry.game(game_id)?;
                let plan = settlement::plan(
                    game.total_paid_in(),
                    game.leaderboard.entries(),
                    &self.config.split,
                );
                self.ledger.apply(&plan)?;

                for (player_id, amount) in &plan.credits {
                    self.events.push(GameEventKind::WinningsCalculated {
                        game_id,
                        player_id: *player_id,
                        amount: *amount,
                    });
                }
                self.registry.remove(game_id);
                self.events.push(GameEventKind::GameDeleted { game_id });
                tracing::info!(
                    game_id,
                    caller,
                    total = %plan.total_paid_in,
                    house_take = %plan.house_take,
                    paid_players = plan.credits.len(),
                    "game settled"
                );
            }
        }
        Ok(outcome)
    }

    /// Забрать свой взнос из refund-игры на личный баланс.
    pub fn claim_refund(&mut self, caller: PlayerId, game_id: GameId) -> Result<Chips, EngineError> {
        let game = self.registry.game(game_id)?;
        let amount = game.refund_due(caller)?;
        self.ledger
            .balance(caller)
            .checked_add(amount)
            .ok_or(EngineError::Overflow)?;

        let game = self.registry.game_mut(game_id)?;
        game.take_refund(caller)?;
        let last = game.pending_refunds == 0;
        self.ledger.credit(caller, amount)?;

        self.events.push(GameEventKind::Refunded {
            game_id,
            player_id: caller,
            amount,
        });
        tracing::warn!(game_id, player = caller, %amount, "refund claimed");

        if last {
            self.registry.remove(game_id);
            self.events.push(GameEventKind::GameDeleted { game_id });
            tracing::info!(game_id, "refunded game deleted");
        }
        Ok(amount)
    }

    /// Вывести весь свой баланс.
    pub fn withdraw(&mut self, caller: PlayerId) -> Result<Chips, EngineError> {
        let amount = self.ledger.withdraw(caller)?;
        self.events.push(GameEventKind::Withdrawal {
            player_id: caller,
            amount,
        });
        tracing::info!(player = caller, %amount, "withdrawal");
        Ok(amount)
    }

    // ---------------------------------------------------------------------
    // Админка (только владелец)
    // ---------------------------------------------------------------------

    pub fn set_max_games(&mut self, caller: PlayerId, max_games: u32) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        if max_games == 0 {
            return Err(EngineError::InvalidGameParams);
        }
        self.config.max_games = max_games;
        self.registry.set_max_games(max_games);
        tracing::info!(max_games, "max games updated");
        Ok(())
    }

    pub fn set_oracle(&mut self, caller: PlayerId, oracle: OracleConfig) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        tracing::info!(coordinator = oracle.coordinator, fee = %oracle.fee, "oracle updated");
        self.config.oracle = oracle;
        Ok(())
    }

    pub fn set_evaluator(
        &mut self,
        caller: PlayerId,
        evaluator: Arc<HandEvaluator>,
    ) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        self.evaluator = evaluator;
        tracing::info!("evaluator replaced");
        Ok(())
    }

    pub fn grant_dealer(&mut self, caller: PlayerId, dealer: PlayerId) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        self.dealers.insert(dealer);
        tracing::info!(dealer, "dealer role granted");
        Ok(())
    }

    pub fn revoke_dealer(&mut self, caller: PlayerId, dealer: PlayerId) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        self.dealers.remove(&dealer);
        tracing::info!(dealer, "dealer role revoked");
        Ok(())
    }

    pub fn withdraw_house(&mut self, caller: PlayerId) -> Result<Chips, EngineError> {
        self.ensure_owner(caller)?;
        let amount = self.ledger.withdraw_house()?;
        self.events.push(GameEventKind::HouseCutWithdrawn { amount });
        tracing::info!(%amount, "house balance withdrawn");
        Ok(amount)
    }

    pub fn transfer_ownership(&mut self, caller: PlayerId, new_owner: PlayerId) -> Result<(), EngineError> {
        self.ensure_owner(caller)?;
        self.owner = new_owner;
        tracing::info!(old = caller, new = new_owner, "ownership transferred");
        Ok(())
    }
}
