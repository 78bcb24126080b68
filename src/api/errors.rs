use serde::{Deserialize, Serialize};

use crate::domain::config::ConfigError;
use crate::domain::{GameId, PlayerId};
use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Игры нет (не создавалась или уже удалена).
    GameNotFound(GameId),

    /// Вызывающему не хватает прав (владелец / дилер / координатор).
    Unauthorized(PlayerId),

    /// Ошибка движка (раунд, оплата, токены, сроки).
    EngineError(String),

    /// Невалидный конфиг.
    Config(String),

    /// Внутренняя ошибка сервера.
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::GameNotFound(id) => ApiError::GameNotFound(id),
            EngineError::Unauthorized(who) | EngineError::NotDealer(who) => {
                ApiError::Unauthorized(who)
            }
            EngineError::Internal(msg) => ApiError::Internal(msg.to_string()),
            other => ApiError::EngineError(other.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
