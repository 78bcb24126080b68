//! RngSeed – доменный seed для запросов случайности.
//!
//! Seed запроса детерминированно выводится из контекста:
//!         seed = H(domain || game_id || round || nonce)
//! Оракул подписывает значение под этим seed, так что два запроса
//! одной арены никогда не совпадают.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::hand::Round;
use crate::domain::GameId;

/// 32-байтовый seed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    /// Seed запроса раздачи раунда `round` игры `game_id`.
    pub fn for_request(game_id: GameId, round: Round, nonce: u64) -> Self {
        let mut hasher = Sha256::new();

        // Доменный префикс
        hasher.update(b"POKER_ARENA_DEAL_V1");
        hasher.update(game_id.to_le_bytes());
        hasher.update([round as u8]);
        hasher.update(nonce.to_le_bytes());

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Self { bytes: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_seeds_differ_by_context() {
        let a = RngSeed::for_request(1, Round::Flop, 0);
        assert_eq!(a, RngSeed::for_request(1, Round::Flop, 0));
        assert_ne!(a, RngSeed::for_request(1, Round::Turn, 0));
        assert_ne!(a, RngSeed::for_request(2, Round::Flop, 0));
        assert_ne!(a, RngSeed::for_request(1, Round::Flop, 1));
    }
}
