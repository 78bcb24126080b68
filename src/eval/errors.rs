use thiserror::Error;

use crate::domain::PlayerId;

use super::lookup_tables::TableKind;

/// Ошибки эвалюатора и загрузки его таблиц.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("caller {0} is not allowed to use the evaluator")]
    AccessDenied(PlayerId),

    #[error("only the evaluator owner may do this")]
    NotOwner,

    #[error("incorrect subscription payment: expected {expected}, got {got}")]
    IncorrectPayment { expected: u64, got: u64 },

    #[error("no earnings to withdraw")]
    NothingToWithdraw,

    #[error("invalid card id {0}")]
    InvalidCard(u8),

    #[error("cards do not form a valid five-card hand")]
    MalformedHand,

    #[error("{0:?} table is already loaded")]
    TableAlreadyLoaded(TableKind),

    #[error("{kind:?} batch out of order: expected {expected}, got {got}")]
    BatchOutOfOrder { kind: TableKind, expected: u32, got: u32 },

    #[error("{kind:?} batch {batch_id} has {got} values, expected {expected}")]
    BatchSizeMismatch {
        kind: TableKind,
        batch_id: u32,
        expected: usize,
        got: usize,
    },

    #[error("{0:?} table value out of range")]
    ValueOutOfRange(TableKind),

    #[error("{0:?} table is incomplete")]
    TableIncomplete(TableKind),

    #[error("evaluator access list is poisoned")]
    Poisoned,
}
