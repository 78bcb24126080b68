//! Внешний API: команды, запросы, маппинг ошибок.

mod common;

use common::*;

use poker_arena::api::{
    dispatch, run_query, AdminCommand, ApiError, Command, CommandResponse, Query, QueryResponse,
};
use poker_arena::domain::chips::Chips;
use poker_arena::domain::game::GameStatus;
use poker_arena::domain::hand::Round;
use poker_arena::engine::events::GameEventKind;

const PLAYER: u64 = 50;

#[test]
fn commands_drive_a_game_and_queries_see_it() {
    let mut arena = arena();
    let token = mint(&mut arena, PLAYER, "Qc", "Qd");

    // старт игры не требует прав
    let started = dispatch(&mut arena, PLAYER, T0, Chips::ZERO, Command::StartGame).unwrap();
    let game_id = match started {
        CommandResponse::GameStarted { game_id } => game_id,
        other => panic!("unexpected response {other:?}"),
    };

    let fulfil = Command::FulfillRandomness {
        request_id: take_last_request(&mut arena),
        value: deal_value(&[], &cards(["Ah", "Kh", "7c"])),
    };
    assert_eq!(
        dispatch(&mut arena, ORACLE, T0 + 1, Chips::ZERO, fulfil.clone()),
        Ok(CommandResponse::Fulfilled { applied: true })
    );
    assert_eq!(
        dispatch(&mut arena, ORACLE, T0 + 1, Chips::ZERO, fulfil),
        Ok(CommandResponse::Fulfilled { applied: false })
    );

    assert_eq!(
        dispatch(
            &mut arena,
            PLAYER,
            T0 + 2,
            FLOP_PRICE,
            Command::AddNftFlop { token_id: token, game_id }
        ),
        Ok(CommandResponse::HandAdded)
    );

    let view = match run_query(&arena, Query::GetGame { game_id }).unwrap() {
        QueryResponse::Game(view) => view,
        other => panic!("unexpected response {other:?}"),
    };
    assert_eq!(view.status, GameStatus::FlopDealt);
    assert_eq!(view.community, vec!["Ah", "Kh", "7c"]);
    assert_eq!(view.total_paid_in, FLOP_PRICE);
    assert_eq!(view.players_acted_this_round, 1);
    assert_eq!(view.active_request, None);
    assert!(view.leaderboard.is_empty());

    let record = match run_query(
        &arena,
        Query::GetPlayerRecord {
            game_id,
            player_id: PLAYER,
        },
    )
    .unwrap()
    {
        QueryResponse::PlayerRecord(record) => record,
        other => panic!("unexpected response {other:?}"),
    };
    assert_eq!(record.last_round, Some(Round::Flop));
    assert_eq!(record.paid_in, FLOP_PRICE);
    assert_eq!(record.flop_tokens, vec![token]);
    assert!(record.turn_tokens.is_empty());
    assert_eq!(record.final_hand, None);
    assert_eq!(record.leaderboard_position, -1);

    match run_query(&arena, Query::ActiveGames).unwrap() {
        QueryResponse::Games(games) => assert_eq!(games.len(), 1),
        other => panic!("unexpected response {other:?}"),
    }

    match run_query(&arena, Query::Events { since: 0 }).unwrap() {
        QueryResponse::Events(events) => {
            assert!(matches!(
                events.first().map(|e| &e.kind),
                Some(GameEventKind::GameStarted { .. })
            ));
            assert!(events.iter().any(|e| matches!(
                e.kind,
                GameEventKind::HandAdded { player_id: PLAYER, .. }
            )));
        }
        other => panic!("unexpected response {other:?}"),
    }
}

#[test]
fn engine_errors_map_to_api_errors() {
    let mut arena = arena();

    assert_eq!(
        dispatch(
            &mut arena,
            PLAYER,
            T0,
            Chips::ZERO,
            Command::Admin(AdminCommand::SetMaxGames { max_games: 3 })
        ),
        Err(ApiError::Unauthorized(PLAYER))
    );
    assert_eq!(
        dispatch(&mut arena, PLAYER, T0, Chips::ZERO, Command::EndGame { game_id: 99 }),
        Err(ApiError::GameNotFound(99))
    );
    assert_eq!(
        run_query(&arena, Query::GetLeaderboard { game_id: 99 }),
        Err(ApiError::GameNotFound(99))
    );

    // кастомная игра доступна только дилеру
    assert_eq!(
        dispatch(
            &mut arena,
            PLAYER,
            T0,
            Chips::ZERO,
            Command::StartCustomGame {
                round_seconds: 300,
                flop_price: Chips(1),
                turn_price: Chips(2),
            }
        ),
        Err(ApiError::Unauthorized(PLAYER))
    );

    let game_id = arena.start_game(OWNER, T0).unwrap();
    fulfil_with(&mut arena, game_id, &cards(["Ah", "Kh", "7c"]), T0 + 1);
    let token = mint(&mut arena, PLAYER, "Qc", "Qd");
    let err = dispatch(
        &mut arena,
        PLAYER,
        T0 + 2,
        Chips(1),
        Command::AddNftFlop { token_id: token, game_id },
    )
    .unwrap_err();
    match err {
        ApiError::EngineError(msg) => assert!(msg.contains("incorrect payment"), "{msg}"),
        other => panic!("unexpected error {other:?}"),
    }

    assert_eq!(
        dispatch(&mut arena, PLAYER, T0 + 2, Chips::ZERO, Command::Withdraw),
        Err(ApiError::EngineError("nothing to withdraw".into()))
    );
}

#[test]
fn admin_commands_go_through_dispatch() {
    let mut arena = arena();

    assert_eq!(
        dispatch(
            &mut arena,
            OWNER,
            T0,
            Chips::ZERO,
            Command::Admin(AdminCommand::GrantDealer { dealer: DEALER })
        ),
        Ok(CommandResponse::Done)
    );
    assert!(arena.is_dealer(DEALER));

    let started = dispatch(
        &mut arena,
        DEALER,
        T0,
        Chips::ZERO,
        Command::StartCustomGame {
            round_seconds: 300,
            flop_price: Chips(1),
            turn_price: Chips(2),
        },
    )
    .unwrap();
    assert!(matches!(started, CommandResponse::GameStarted { .. }));

    assert!(matches!(
        dispatch(
            &mut arena,
            OWNER,
            T0,
            Chips::ZERO,
            Command::Admin(AdminCommand::WithdrawHouse)
        ),
        Err(ApiError::EngineError(_))
    ));
    match run_query(&arena, Query::HouseBalance).unwrap() {
        QueryResponse::Balance(amount) => assert_eq!(amount, Chips::ZERO),
        other => panic!("unexpected response {other:?}"),
    }
}

#[test]
fn commands_are_plain_json() {
    let command = Command::PlayFinalHand {
        token_id: 7,
        river_cards: cards(["Ah", "Kh", "7c"]),
        game_id: 3,
    };
    let json = serde_json::to_string(&command).unwrap();
    assert!(json.contains("PlayFinalHand"));

    let back: Command = serde_json::from_str(&json).unwrap();
    assert_eq!(serde_json::to_string(&back).unwrap(), json);

    let err: ApiError = serde_json::from_str::<Command>("{\"Nope\":1}")
        .unwrap_err()
        .into();
    assert!(matches!(err, ApiError::BadRequest(_)));
}
