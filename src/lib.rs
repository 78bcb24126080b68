//! Главный модуль покерной арены на Linera.
//!
//! Здесь описываем ABI (Operation / Message / Query / Response) и
//! связываем contract/service с нашим PokerArenaState.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod state;
pub mod time_ctrl;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

use crate::api::{Command, CommandResponse, Query, QueryResponse};
use crate::state::PokerArenaState;

/// Операции (внешние команды), которые модуль принимает.
///
/// Одна операция = одна команда из api::Command.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PokerOperation {
    Command(Command),
}

/// Сообщения между приложениями Linera.
/// Пока нам не нужны – оставим пустой enum.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PokerMessage {}

/// Запросы к сервису (read-only).
pub type PokerQuery = Query;

/// Ответы на запросы.
pub type PokerResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct PokerAbi;

impl ContractAbi for PokerAbi {
    type Operation = PokerOperation;
    type Response = CommandResponse;
}

impl ServiceAbi for PokerAbi {
    type Query = PokerQuery;
    type QueryResponse = PokerResponse;
}

/// Экспортируем тип состояния, чтобы contract.rs и service.rs могли его использовать.
pub type Storage = PokerArenaState;
