// src/engine/game_registry.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::game::GameParams;
use crate::domain::hand::Round;
use crate::domain::{GameId, RequestId, Timestamp};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::Game;
use crate::infra::ids::IdGenerator;

/// Какой раздачи ждёт запрос случайности.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingDeal {
    pub game_id: GameId,
    pub round: Round,
}

/// Реестр живых игр:
/// - хранит игры по GameId, не больше `max_games` одновременно;
/// - выдаёт монотонные id;
/// - помнит, какой запрос случайности к какой игре/раунду относится.
#[derive(Debug)]
pub struct GameRegistry {
    games: BTreeMap<GameId, Game>,
    pending: BTreeMap<RequestId, PendingDeal>,
    ids: IdGenerator,
    max_games: u32,
}

impl GameRegistry {
    /// Создать пустой реестр.
    pub fn new(max_games: u32) -> Self {
        Self {
            games: BTreeMap::new(),
            pending: BTreeMap::new(),
            ids: IdGenerator::new(),
            max_games,
        }
    }

    /// Восстановить реестр из сохранённых частей.
    pub fn from_parts(
        games: Vec<Game>,
        pending: Vec<(RequestId, PendingDeal)>,
        next_game_id: GameId,
        max_games: u32,
    ) -> Self {
        Self {
            games: games.into_iter().map(|g| (g.id, g)).collect(),
            pending: pending.into_iter().collect(),
            ids: IdGenerator::starting_at(next_game_id, 1),
            max_games,
        }
    }

    pub fn max_games(&self) -> u32 {
        self.max_games
    }

    pub fn set_max_games(&mut self, max_games: u32) {
        self.max_games = max_games;
    }

    pub fn active_count(&self) -> usize {
        self.games.len()
    }

    pub fn can_start(&self) -> bool {
        self.games.len() < self.max_games as usize
    }

    pub fn next_game_id(&self) -> GameId {
        self.ids.peek_game_id()
    }

    /// Завести игру, чей флоп уже запрошен запросом `request_id`.
    pub fn create_game(
        &mut self,
        params: GameParams,
        request_id: RequestId,
        now: Timestamp,
    ) -> Result<GameId, EngineError> {
        if !self.can_start() {
            return Err(EngineError::TooManyGames);
        }
        let id = self.ids.next_game_id();
        self.games.insert(id, Game::new(id, params, request_id, now));
        self.pending.insert(
            request_id,
            PendingDeal {
                game_id: id,
                round: Round::Flop,
            },
        );
        Ok(id)
    }

    /// Есть ли игра с таким id.
    pub fn has_game(&self, game_id: GameId) -> bool {
        self.games.contains_key(&game_id)
    }

    pub fn game(&self, game_id: GameId) -> Result<&Game, EngineError> {
        self.games
            .get(&game_id)
            .ok_or(EngineError::GameNotFound(game_id))
    }

    pub fn game_mut(&mut self, game_id: GameId) -> Result<&mut Game, EngineError> {
        self.games
            .get_mut(&game_id)
            .ok_or(EngineError::GameNotFound(game_id))
    }

    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    pub fn register_request(&mut self, request_id: RequestId, game_id: GameId, round: Round) {
        self.pending.insert(request_id, PendingDeal { game_id, round });
    }

    /// Снять запрос (одноразово: второй вызов с тем же id вернёт None).
    pub fn take_request(&mut self, request_id: RequestId) -> Option<PendingDeal> {
        self.pending.remove(&request_id)
    }

    pub fn pending_requests(&self) -> Vec<(RequestId, PendingDeal)> {
        self.pending.iter().map(|(id, p)| (*id, *p)).collect()
    }

    /// Забыть все запросы игры: поздний колбэк станет no-op.
    pub fn forget_requests(&mut self, game_id: GameId) {
        self.pending.retain(|_, p| p.game_id != game_id);
    }

    /// Удалить игру и освободить слот.
    pub fn remove(&mut self, game_id: GameId) -> Option<Game> {
        self.forget_requests(game_id);
        self.games.remove(&game_id)
    }
}
