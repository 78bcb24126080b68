// src/bin/poker_arena_sim.rs
//
// Полная игра арены против локального координатора случайности:
// флоп → тёрн → ривер → итоговые руки → расчёт → вывод балансов.
//
// Уровень логов: RUST_LOG=poker_arena=debug

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use poker_arena::api::{build_game_view, build_leaderboard_dto};
use poker_arena::domain::card::CardId;
use poker_arena::domain::config::{ArenaConfig, OracleConfig};
use poker_arena::domain::{PlayerId, Timestamp, TokenId};
use poker_arena::engine::{AssetRegistry, EngineError, PokerArena};
use poker_arena::eval::{describe_hand, HandEvaluator};
use poker_arena::infra::{InMemoryAssetRegistry, MockVrfCoordinator};

const OWNER: PlayerId = 1;
const ARENA: PlayerId = 2;
const ORACLE: PlayerId = 3;
const PLAYERS: u64 = 6;

type Arena = PokerArena<MockVrfCoordinator, InMemoryAssetRegistry>;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(7);
    println!("poker_arena_sim: seed = {seed}");

    let evaluator = Arc::new(HandEvaluator::with_generated_tables(OWNER, Default::default()));
    evaluator.grant_access(OWNER, ARENA)?;

    let config = ArenaConfig {
        oracle: OracleConfig {
            coordinator: ORACLE,
            ..OracleConfig::default()
        },
        ..ArenaConfig::default()
    };
    let round = config.round_seconds;
    let mut arena: Arena = PokerArena::new(
        ARENA,
        OWNER,
        config,
        evaluator.clone(),
        MockVrfCoordinator::from_seed(seed),
        InMemoryAssetRegistry::new(),
    )?;

    // Раздаём игрокам по NFT-руке без пересечений между собой.
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut ids: Vec<u8> = (0..52).collect();
    ids.shuffle(&mut rng);
    let mut seats: Vec<(PlayerId, TokenId)> = Vec::new();
    for i in 0..PLAYERS {
        let player = 100 + i;
        let c1 = CardId(ids[(2 * i) as usize]);
        let c2 = CardId(ids[(2 * i + 1) as usize]);
        let token = arena.assets_mut().mint_hand(player, c1, c2);
        println!("player {player}: token {token} = {c1} {c2}");
        seats.push((player, token));
    }

    let mut now: Timestamp = 1_700_000_000;
    let game_id = arena.start_game(OWNER, now)?;

    // ---- флоп ----
    now += 5;
    fulfil_last(&mut arena, now)?;
    let flop_price = arena.config().flop_price;
    for &(player, token) in &seats {
        report(arena.add_nft_flop(player, token, game_id, flop_price, now), player, "flop");
    }

    // ---- тёрн ----
    now += round;
    arena.request_deal(OWNER, game_id, now)?;
    now += 5;
    fulfil_last(&mut arena, now)?;
    let turn_price = arena.config().turn_price;
    for &(player, token) in &seats {
        report(arena.add_nft_turn(player, token, game_id, turn_price, now), player, "turn");
    }

    // ---- ривер ----
    now += round;
    arena.request_deal(OWNER, game_id, now)?;
    now += 5;
    fulfil_last(&mut arena, now)?;

    let community = arena.game(game_id)?.community.clone();
    println!(
        "board: {}",
        community.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
    );

    for &(player, token) in &seats {
        let Some(chosen) = best_three(&arena, token, &community) else {
            continue;
        };
        report(
            arena.play_final_hand(player, token, chosen, game_id, now).map(|_| ()),
            player,
            "final hand",
        );
    }

    for row in build_leaderboard_dto(&arena.game(game_id)?.leaderboard) {
        println!(
            "#{} player {} score {} ({})",
            row.position, row.player_id, row.score, row.description
        );
    }
    println!("{:?}", build_game_view(arena.game(game_id)?));

    // ---- расчёт ----
    now += round;
    let outcome = arena.end_game(OWNER, game_id, now)?;
    println!("end_game: {outcome:?}");

    for &(player, _) in &seats {
        if let Ok(amount) = arena.withdraw(player) {
            println!("player {player} withdrew {amount}");
        }
    }
    println!("house balance: {}", arena.house_balance());
    println!("events: {}", arena.events().len());
    Ok(())
}

/// Доставить в арену последнее значение координатора.
fn fulfil_last(arena: &mut Arena, now: Timestamp) -> Result<(), EngineError> {
    let Some((request_id, value)) = arena.randomness_mut().deliver_last() else {
        return Ok(());
    };
    arena.fulfill_randomness(ORACLE, request_id, value, now)?;
    Ok(())
}

/// Лучшие 3 общие карты для руки (перебор 10 сочетаний).
fn best_three(arena: &Arena, token: TokenId, community: &[CardId]) -> Option<[CardId; 3]> {
    let hand_id = arena.assets().token_hand_id(token)?;
    let (h1, h2) = arena.assets().hand_card_ids(hand_id)?;
    if community.contains(&h1) || community.contains(&h2) {
        return None;
    }
    let evaluator = arena.evaluator();
    let mut best: Option<(u16, [CardId; 3])> = None;
    for a in 0..community.len() {
        for b in a + 1..community.len() {
            for c in b + 1..community.len() {
                let chosen = [community[a], community[b], community[c]];
                let cards = [h1, h2, chosen[0], chosen[1], chosen[2]];
                let Ok(score) = evaluator.evaluate(OWNER, cards) else {
                    continue;
                };
                if best.map_or(true, |(s, _)| score.0 < s) {
                    best = Some((score.0, chosen));
                }
            }
        }
    }
    if let Some((score, _)) = best {
        println!("token {token}: best {score} ({})", describe_hand(poker_arena::domain::RankScore(score)));
    }
    best.map(|(_, chosen)| chosen)
}

fn report(result: Result<(), EngineError>, player: PlayerId, what: &str) {
    if let Err(e) = result {
        println!("player {player}: {what} rejected: {e}");
    }
}
