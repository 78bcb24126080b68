//! Доменная модель: карты, колода игры, NFT-руки, записи игроков, игра, конфиг.

pub mod card;
pub mod chips;
pub mod config;
pub mod deck;
pub mod game;
pub mod hand;
pub mod player;

// Базовые идентификаторы
pub type PlayerId = u64;
pub type GameId = u64;
pub type TokenId = u64;
/// Идентификатор руки в реестре ассетов (не путать с TokenId).
pub type HandId = u64;
pub type RequestId = u64;
/// Секунды unix-времени.
pub type Timestamp = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::CardId и т.п.
pub use card::*;
pub use chips::*;
pub use config::*;
pub use deck::*;
pub use game::*;
pub use hand::*;
pub use player::*;
