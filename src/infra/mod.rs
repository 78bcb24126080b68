//! Инфраструктурный слой вокруг движка арены:
//! - генерация ID;
//! - координатор случайности для тестов и симуляций;
//! - seed'ы запросов;
//! - in-memory реестр NFT-рук;
//! - абстракция хранения (off-chain / тесты).

pub mod assets;
pub mod ids;
pub mod persistence;
pub mod rng;
pub mod rng_seed;

pub use assets::InMemoryAssetRegistry;
pub use ids::IdGenerator;
pub use persistence::{ArenaStorage, InMemoryArenaStorage};
pub use rng::{MockVrfCoordinator, VrfRequest};
pub use rng_seed::RngSeed;
