//! Модуль оценки силы 5-карточных рук.
//!
//! Основная функция:
//!   `HandEvaluator::evaluate(caller, [CardId; 5]) -> RankScore`
//!
//! Оценка за O(1): suit-hash решает, флеш ли это; флеши идут через таблицу
//! по маске рангов, остальные – через quinary perfect hash вектора количеств.

pub mod errors;
pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;
pub mod upload;

pub use errors::EvalError;
pub use evaluator::HandEvaluator;
pub use hand_rank::{describe_hand, HandCategory};
pub use lookup_tables::{EvaluatorTables, TableKind};
pub use upload::{TableBatch, TableUpload};
