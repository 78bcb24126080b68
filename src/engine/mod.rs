//! Покерный движок арены: игры, раунды, лидерборд, расчёт банка.
//!
//! Высокоуровневый объект: `PokerArena`
//! Основные операции:
//!   - `start_game` / `start_custom_game` – завести игру и запросить флоп;
//!   - `fulfill_randomness` – колбэк оракула, открывает карты раунда;
//!   - `add_nft_flop` / `add_nft_turn` – платное участие NFT-рукой;
//!   - `request_deal` – дилер запрашивает следующий раунд;
//!   - `play_final_hand` – сыграть итоговую руку после ривера;
//!   - `end_game` / `claim_refund` / `withdraw` – завершение и выплаты.

pub mod arena;
pub mod errors;
pub mod events;
pub mod game_loop;
pub mod game_registry;
pub mod leaderboard;
pub mod pot;
pub mod settlement;
pub mod validation;

pub use arena::PokerArena;
pub use errors::{EngineError, RandomnessError};
pub use events::{EventLog, GameEvent, GameEventKind};
pub use game_loop::{EndOutcome, Game};
pub use game_registry::{GameRegistry, PendingDeal};
pub use leaderboard::{Leaderboard, LeaderboardEntry, LEADERBOARD_CAPACITY};
pub use pot::Pot;
pub use settlement::{Ledger, SettlementPlan};

use crate::domain::{CardId, Chips, HandId, PlayerId, RequestId, TokenId};
use crate::infra::rng_seed::RngSeed;

/// Клиент внешнего источника проверяемой случайности.
///
/// Запрос синхронный и сразу возвращает id; само значение придёт позже
/// через `PokerArena::fulfill_randomness` с произвольной задержкой (или не придёт).
pub trait RandomnessClient {
    fn request_randomness(
        &mut self,
        key_hash: [u8; 32],
        fee: Chips,
        seed: &RngSeed,
    ) -> Result<RequestId, RandomnessError>;
}

/// Всё, что движку нужно от реестра NFT-рук.
pub trait AssetRegistry {
    fn owner_of(&self, token_id: TokenId) -> Option<PlayerId>;

    fn token_hand_id(&self, token_id: TokenId) -> Option<HandId>;

    fn hand_card_ids(&self, hand_id: HandId) -> Option<(CardId, CardId)>;
}
