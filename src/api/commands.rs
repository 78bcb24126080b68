use serde::{Deserialize, Serialize};

use crate::domain::card::CardId;
use crate::domain::chips::Chips;
use crate::domain::config::OracleConfig;
use crate::domain::hand::RankScore;
use crate::domain::{GameId, PlayerId, RequestId, Timestamp, TokenId};
use crate::engine::{AssetRegistry, EndOutcome, PokerArena, RandomnessClient};
use crate::eval::HandCategory;

use super::errors::ApiError;

/// Команда верхнего уровня.
///
/// Эти команды превращаются в операции (`PokerOperation`),
/// которые Linera экспонирует наружу. Вызывающий, время и
/// приложенный платёж приходят снаружи команды (из контекста блока).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Новая игра с параметрами из конфига арены.
    StartGame,

    /// Новая игра со своими длиной раунда и ценами (только дилер).
    StartCustomGame {
        round_seconds: u64,
        flop_price: Chips,
        turn_price: Chips,
    },

    /// Отправить NFT во флоп (платёж = цена флопа).
    AddNftFlop { token_id: TokenId, game_id: GameId },

    /// Отправить NFT в тёрн (платёж = цена тёрна).
    AddNftTurn { token_id: TokenId, game_id: GameId },

    /// Дилер просит карты следующего раунда.
    RequestDeal { game_id: GameId },

    /// Итоговая рука: NFT + три общие карты.
    PlayFinalHand {
        token_id: TokenId,
        river_cards: [CardId; 3],
        game_id: GameId,
    },

    /// Завершить игру (кто угодно).
    EndGame { game_id: GameId },

    /// Забрать взнос из refund-игры.
    ClaimRefund { game_id: GameId },

    /// Вывести свой баланс.
    Withdraw,

    /// Колбэк координатора случайности.
    FulfillRandomness { request_id: RequestId, value: u128 },

    /// Админские команды (только владелец арены).
    Admin(AdminCommand),
}

/// Админская поверхность арены.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum AdminCommand {
    SetMaxGames { max_games: u32 },
    SetOracle(OracleConfig),
    GrantDealer { dealer: PlayerId },
    RevokeDealer { dealer: PlayerId },
    WithdrawHouse,
    TransferOwnership { new_owner: PlayerId },
}

/// Что вернула команда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResponse {
    GameStarted { game_id: GameId },
    HandAdded,
    DealRequested { request_id: RequestId },
    FinalHandPlayed { score: RankScore, category: HandCategory },
    GameEnded { outcome: EndOutcome },
    /// Сумма, ушедшая на личный баланс / из него.
    Amount(Chips),
    /// Применён ли колбэк оракула (false – запрос неактуален).
    Fulfilled { applied: bool },
    Done,
}

/// Выполнить команду над ареной от имени `caller`.
pub fn dispatch<R: RandomnessClient, A: AssetRegistry>(
    arena: &mut PokerArena<R, A>,
    caller: PlayerId,
    now: Timestamp,
    payment: Chips,
    command: Command,
) -> Result<CommandResponse, ApiError> {
    let response = match command {
        Command::StartGame => CommandResponse::GameStarted {
            game_id: arena.start_game(caller, now)?,
        },
        Command::StartCustomGame {
            round_seconds,
            flop_price,
            turn_price,
        } => CommandResponse::GameStarted {
            game_id: arena.start_custom_game(caller, round_seconds, flop_price, turn_price, now)?,
        },
        Command::AddNftFlop { token_id, game_id } => {
            arena.add_nft_flop(caller, token_id, game_id, payment, now)?;
            CommandResponse::HandAdded
        }
        Command::AddNftTurn { token_id, game_id } => {
            arena.add_nft_turn(caller, token_id, game_id, payment, now)?;
            CommandResponse::HandAdded
        }
        Command::RequestDeal { game_id } => CommandResponse::DealRequested {
            request_id: arena.request_deal(caller, game_id, now)?,
        },
        Command::PlayFinalHand {
            token_id,
            river_cards,
            game_id,
        } => {
            let score = arena.play_final_hand(caller, token_id, river_cards, game_id, now)?;
            let category = HandCategory::from_score(score)
                .ok_or_else(|| ApiError::Internal(format!("score {} out of range", score.0)))?;
            CommandResponse::FinalHandPlayed { score, category }
        }
        Command::EndGame { game_id } => CommandResponse::GameEnded {
            outcome: arena.end_game(caller, game_id, now)?,
        },
        Command::ClaimRefund { game_id } => {
            CommandResponse::Amount(arena.claim_refund(caller, game_id)?)
        }
        Command::Withdraw => CommandResponse::Amount(arena.withdraw(caller)?),
        Command::FulfillRandomness { request_id, value } => CommandResponse::Fulfilled {
            applied: arena.fulfill_randomness(caller, request_id, value, now)?,
        },
        Command::Admin(admin) => dispatch_admin(arena, caller, admin)?,
    };
    Ok(response)
}

fn dispatch_admin<R: RandomnessClient, A: AssetRegistry>(
    arena: &mut PokerArena<R, A>,
    caller: PlayerId,
    command: AdminCommand,
) -> Result<CommandResponse, ApiError> {
    match command {
        AdminCommand::SetMaxGames { max_games } => arena.set_max_games(caller, max_games)?,
        AdminCommand::SetOracle(oracle) => arena.set_oracle(caller, oracle)?,
        AdminCommand::GrantDealer { dealer } => arena.grant_dealer(caller, dealer)?,
        AdminCommand::RevokeDealer { dealer } => arena.revoke_dealer(caller, dealer)?,
        AdminCommand::WithdrawHouse => {
            return Ok(CommandResponse::Amount(arena.withdraw_house(caller)?));
        }
        AdminCommand::TransferOwnership { new_owner } => {
            arena.transfer_ownership(caller, new_owner)?
        }
    }
    Ok(CommandResponse::Done)
}
