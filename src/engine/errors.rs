use crate::domain::{GameId, GameStatus, PlayerId, Round, TokenId};
use crate::eval::EvalError;

use thiserror::Error;

/// Ошибки клиента источника случайности.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RandomnessError {
    #[error("insufficient oracle fee balance")]
    InsufficientFee,
}

/// Ошибки движка. Любая ошибка означает, что состояние не изменилось.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("game {0} does not exist")]
    GameNotFound(GameId),

    #[error("max concurrent games reached")]
    TooManyGames,

    #[error("invalid custom game parameters")]
    InvalidGameParams,

    #[error("wrong round: game is in {0:?}")]
    WrongRound(GameStatus),

    #[error("round is over")]
    RoundOver,

    #[error("incorrect payment: expected {expected}, got {got}")]
    IncorrectPayment { expected: u64, got: u64 },

    #[error("token {0} does not exist")]
    UnknownToken(TokenId),

    #[error("caller {caller} does not own token {token}")]
    NotTokenOwner { caller: PlayerId, token: TokenId },

    #[error("hole card already dealt as community card")]
    HoleCardDealt,

    #[error("token {0} already submitted this round")]
    TokenAlreadySubmitted(TokenId),

    #[error("token {token} was not submitted in the {round:?} round")]
    TokenNotSubmitted { token: TokenId, round: Round },

    #[error("cannot request deal yet")]
    CannotRequestDealYet,

    #[error("not time to deal")]
    NotTimeToDeal,

    #[error("caller {0} is not a dealer")]
    NotDealer(PlayerId),

    #[error("chosen cards are not three distinct community cards")]
    InvalidCommunityCards,

    #[error("player {0} already played a final hand")]
    FinalHandAlreadyPlayed(PlayerId),

    #[error("game cannot be ended yet")]
    CannotEndGame,

    #[error("game {0} is refundable; play is closed")]
    GameRefundable(GameId),

    #[error("game {0} is not refundable")]
    NotRefundable(GameId),

    #[error("nothing to refund")]
    NothingToRefund,

    #[error("nothing to withdraw")]
    NothingToWithdraw,

    #[error("caller {0} is not authorized")]
    Unauthorized(PlayerId),

    #[error("amount overflow")]
    Overflow,

    #[error(transparent)]
    Randomness(#[from] RandomnessError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("internal error: {0}")]
    Internal(&'static str),
}
