//! Общие хелперы интеграционных тестов арены.

#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use poker_arena::domain::card::CardId;
use poker_arena::domain::config::{ArenaConfig, OracleConfig};
use poker_arena::domain::{Chips, PlayerId, RequestId, Timestamp, TokenId};
use poker_arena::engine::PokerArena;
use poker_arena::eval::{EvaluatorTables, HandEvaluator};
use poker_arena::infra::{InMemoryAssetRegistry, MockVrfCoordinator};

pub const OWNER: PlayerId = 1;
pub const ARENA: PlayerId = 2;
pub const ORACLE: PlayerId = 3;
pub const DEALER: PlayerId = 4;

pub const T0: Timestamp = 1_000;
pub const ROUND: u64 = 600;
pub const GRACE: u64 = 3_600;

pub const FLOP_PRICE: Chips = Chips(10_000);
pub const TURN_PRICE: Chips = Chips(20_000);

pub type Arena = PokerArena<MockVrfCoordinator, InMemoryAssetRegistry>;

/// Таблицы считаем один раз на весь бинарь теста.
pub fn tables() -> Arc<EvaluatorTables> {
    static TABLES: OnceLock<Arc<EvaluatorTables>> = OnceLock::new();
    TABLES
        .get_or_init(|| Arc::new(EvaluatorTables::generate()))
        .clone()
}

/// Эвалюатор, где арене уже выдан доступ.
pub fn evaluator() -> Arc<HandEvaluator> {
    let ev = HandEvaluator::new(tables(), OWNER, Chips(1_000));
    ev.grant_access(OWNER, ARENA).unwrap();
    Arc::new(ev)
}

pub fn config() -> ArenaConfig {
    ArenaConfig {
        round_seconds: ROUND,
        stale_grace_seconds: GRACE,
        flop_price: FLOP_PRICE,
        turn_price: TURN_PRICE,
        oracle: OracleConfig {
            coordinator: ORACLE,
            ..OracleConfig::default()
        },
        ..ArenaConfig::default()
    }
}

pub fn arena_with(config: ArenaConfig) -> Arena {
    PokerArena::new(
        ARENA,
        OWNER,
        config,
        evaluator(),
        MockVrfCoordinator::from_seed(42),
        InMemoryAssetRegistry::new(),
    )
    .unwrap()
}

pub fn arena() -> Arena {
    arena_with(config())
}

pub fn card(s: &str) -> CardId {
    s.parse().unwrap()
}

pub fn cards<const N: usize>(list: [&str; N]) -> [CardId; N] {
    list.map(card)
}

/// Выпустить NFT-руку игроку.
pub fn mint(arena: &mut Arena, player: PlayerId, c1: &str, c2: &str) -> TokenId {
    arena.assets_mut().mint_hand(player, card(c1), card(c2))
}

/// Случайное значение, которое при колоде без `dealt` сдаст ровно `wanted` по порядку.
pub fn deal_value(dealt: &[CardId], wanted: &[CardId]) -> u128 {
    let mut removed: Vec<u8> = dealt.iter().map(|c| c.0).collect();
    let mut value = 0u128;
    let mut multiplier = 1u128;
    for w in wanted {
        let remaining: Vec<u8> = (0..52u8).filter(|id| !removed.contains(id)).collect();
        let idx = remaining.iter().position(|&id| id == w.0).unwrap() as u128;
        value += idx * multiplier;
        multiplier *= remaining.len() as u128;
        removed.push(w.0);
    }
    value
}

/// Последний запрос координатора (он же единственный неисполненный в простых сценариях).
pub fn last_request(arena: &Arena) -> RequestId {
    arena.randomness().last_request().unwrap()
}

/// Забрать последний запрос у координатора, чтобы доставить его самостоятельно.
pub fn take_last_request(arena: &mut Arena) -> RequestId {
    let request_id = last_request(arena);
    arena.randomness_mut().take(request_id);
    request_id
}

/// Доставить в игру конкретные карты через последний запрос.
pub fn fulfil_with(arena: &mut Arena, game_id: u64, wanted: &[CardId], now: Timestamp) -> bool {
    let dealt = arena.game(game_id).unwrap().community.clone();
    let value = deal_value(&dealt, wanted);
    let request_id = take_last_request(arena);
    arena
        .fulfill_randomness(ORACLE, request_id, value, now)
        .unwrap()
}
