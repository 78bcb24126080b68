use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::game::GameStatus;
use crate::domain::hand::Round;
use crate::domain::{GameId, PlayerId, RequestId, Timestamp, TokenId};
use crate::eval::HandCategory;

/// DTO строки лидерборда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntryDto {
    pub position: u8,
    pub player_id: PlayerId,
    pub score: u16,
    pub category: HandCategory,
    /// "Full house", "Two pair" и т.п.
    pub description: String,
}

/// DTO игры.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameViewDto {
    pub game_id: GameId,
    pub status: GameStatus,
    pub round_end_time: Timestamp,
    /// Общие карты в текстовом виде ("Ah", "Td", ...).
    pub community: Vec<String>,
    pub total_paid_in: Chips,
    pub players_acted_this_round: u32,
    pub refundable: bool,
    pub active_request: Option<RequestId>,
    pub flop_price: Chips,
    pub turn_price: Chips,
    pub leaderboard: Vec<LeaderboardEntryDto>,
}

/// DTO итоговой руки игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinalHandDto {
    pub token_id: TokenId,
    pub cards: Vec<String>,
    pub score: u16,
    pub description: String,
}

/// DTO участия игрока в игре.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerRecordDto {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub last_round: Option<Round>,
    pub paid_in: Chips,
    pub flop_tokens: Vec<TokenId>,
    pub turn_tokens: Vec<TokenId>,
    pub final_hand: Option<FinalHandDto>,
    /// Позиция в лидерборде или -1.
    pub leaderboard_position: i32,
}
