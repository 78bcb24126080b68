use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{GameId, PlayerId};
use crate::engine::events::GameEvent;
use crate::engine::game_loop::Game;
use crate::engine::leaderboard::Leaderboard;
use crate::engine::{AssetRegistry, PokerArena, RandomnessClient};
use crate::eval::describe_hand;

use super::dto::{FinalHandDto, GameViewDto, LeaderboardEntryDto, PlayerRecordDto};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Состояние игры.
    GetGame { game_id: GameId },

    /// Лидерборд игры.
    GetLeaderboard { game_id: GameId },

    /// Что игрок сделал в игре.
    GetPlayerRecord { game_id: GameId, player_id: PlayerId },

    /// Баланс к выводу.
    GetBalance { player_id: PlayerId },

    HouseBalance,

    /// Список живых игр (для лобби).
    ActiveGames,

    /// События начиная с индекса (поллинг наблюдателем).
    Events { since: u64 },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum QueryResponse {
    Game(GameViewDto),
    Leaderboard(Vec<LeaderboardEntryDto>),
    PlayerRecord(PlayerRecordDto),
    Balance(Chips),
    Games(Vec<GameViewDto>),
    Events(Vec<GameEvent>),
}

/// Выполнить запрос.
pub fn run_query<R: RandomnessClient, A: AssetRegistry>(
    arena: &PokerArena<R, A>,
    query: Query,
) -> Result<QueryResponse, ApiError> {
    let response = match query {
        Query::GetGame { game_id } => QueryResponse::Game(build_game_view(arena.game(game_id)?)),
        Query::GetLeaderboard { game_id } => {
            QueryResponse::Leaderboard(build_leaderboard_dto(&arena.game(game_id)?.leaderboard))
        }
        Query::GetPlayerRecord { game_id, player_id } => {
            QueryResponse::PlayerRecord(build_player_record(arena.game(game_id)?, player_id))
        }
        Query::GetBalance { player_id } => QueryResponse::Balance(arena.balance(player_id)),
        Query::HouseBalance => QueryResponse::Balance(arena.house_balance()),
        Query::ActiveGames => {
            QueryResponse::Games(arena.registry().games().map(build_game_view).collect())
        }
        Query::Events { since } => QueryResponse::Events(arena.events().since(since).cloned().collect()),
    };
    Ok(response)
}

/// Сформировать DTO игры.
pub fn build_game_view(game: &Game) -> GameViewDto {
    GameViewDto {
        game_id: game.id,
        status: game.status,
        round_end_time: game.round_end_time(),
        community: game.community.iter().map(|c| c.to_string()).collect(),
        total_paid_in: game.total_paid_in(),
        players_acted_this_round: game.players_acted_this_round,
        refundable: game.refundable,
        active_request: game.active_request,
        flop_price: game.params.flop_price,
        turn_price: game.params.turn_price,
        leaderboard: build_leaderboard_dto(&game.leaderboard),
    }
}

pub fn build_leaderboard_dto(board: &Leaderboard) -> Vec<LeaderboardEntryDto> {
    board
        .entries()
        .iter()
        .enumerate()
        .map(|(pos, e)| LeaderboardEntryDto {
            position: pos as u8,
            player_id: e.player_id,
            score: e.score.0,
            category: e.category,
            description: describe_hand(e.score),
        })
        .collect()
}

/// Запись игрока. Игрок без участия получает пустую запись.
pub fn build_player_record(game: &Game, player_id: PlayerId) -> PlayerRecordDto {
    let record = game.record(player_id);
    PlayerRecordDto {
        game_id: game.id,
        player_id,
        last_round: record.and_then(|r| r.last_round),
        paid_in: record.map_or(Chips::ZERO, |r| r.paid_in),
        flop_tokens: record.map_or_else(Vec::new, |r| r.flop_tokens.iter().copied().collect()),
        turn_tokens: record.map_or_else(Vec::new, |r| r.turn_tokens.iter().copied().collect()),
        final_hand: record.and_then(|r| r.final_hand.as_ref()).map(|h| FinalHandDto {
            token_id: h.token_id,
            cards: h.cards.iter().map(|c| c.to_string()).collect(),
            score: h.score.0,
            description: describe_hand(h.score),
        }),
        leaderboard_position: game.leaderboard.position(player_id),
    }
}
