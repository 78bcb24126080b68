//! Тесты эвалюатора:
//! - эталонные векторы и границы категорий;
//! - полный перебор всех 2 598 960 рук (частоты категорий);
//! - доступ (grant / revoke / подписка);
//! - батчевая загрузка таблиц.

mod common;

use common::*;

use poker_arena::domain::card::CardId;
use poker_arena::domain::chips::Chips;
use poker_arena::domain::hand::RankScore;
use poker_arena::eval::{
    describe_hand, EvalError, HandCategory, HandEvaluator, TableBatch, TableKind, TableUpload,
};

fn ids(raw: [u8; 5]) -> [CardId; 5] {
    raw.map(CardId)
}

#[test]
fn reference_vectors() {
    let ev = evaluator();
    let cases: [([u8; 5], u16, HandCategory); 5] = [
        ([35, 39, 43, 47, 51], 1, HandCategory::RoyalFlush),
        ([31, 35, 39, 43, 47], 2, HandCategory::StraightFlush),
        ([1, 48, 49, 50, 51], 22, HandCategory::FourOfAKind),
        ([1, 2, 3, 4, 5], 322, HandCategory::FullHouse),
        ([24, 32, 12, 51, 3], 6586, HandCategory::HighCard),
    ];
    for (raw, score, category) in cases {
        let (got, cat) = ev.evaluate_with_category(OWNER, ids(raw)).unwrap();
        assert_eq!(got, RankScore(score), "cards {raw:?}");
        assert_eq!(cat, category);
    }
}

#[test]
fn card_order_does_not_matter() {
    let ev = evaluator();
    let a = ev.evaluate(OWNER, ids([24, 32, 12, 51, 3])).unwrap();
    let b = ev.evaluate(OWNER, ids([3, 51, 12, 32, 24])).unwrap();
    assert_eq!(a, b);
}

#[test]
fn category_edges() {
    let ev = evaluator();
    let score = |s: [&str; 5]| ev.evaluate(OWNER, cards(s)).unwrap().0;

    // Колесо в масть – худший стрит-флеш.
    assert_eq!(score(["Ac", "2c", "3c", "4c", "5c"]), 10);
    // Колесо разномастное – худший стрит.
    assert_eq!(score(["Ac", "2d", "3h", "4s", "5c"]), 1609);
    // Лучшая и худшая старшая карта.
    assert_eq!(score(["Ac", "Kd", "Qh", "Js", "9c"]), 6186);
    assert_eq!(score(["7c", "5d", "4h", "3s", "2c"]), 7462);
    // Тузовый флеш без стрита – лучший флеш.
    assert_eq!(score(["Ah", "Kh", "Qh", "Jh", "9h"]), 323);

    assert_eq!(describe_hand(RankScore(1)), "Royal flush");
    assert_eq!(describe_hand(RankScore(3000)), "Two pair");
    assert_eq!(HandCategory::from_score(RankScore(0)), None);
    assert_eq!(HandCategory::from_score(RankScore(7463)), None);
}

#[test]
fn exhaustive_category_frequencies() {
    let tables = tables();
    let mut counts = [0u32; 10];
    let mut seen = vec![false; 7463];

    for a in 0..48u8 {
        for b in a + 1..49 {
            for c in b + 1..50 {
                for d in c + 1..51 {
                    for e in d + 1..52 {
                        let score = tables.score_five(ids([a, b, c, d, e])).unwrap();
                        seen[score.0 as usize] = true;
                        let cat = HandCategory::from_score(score).unwrap();
                        counts[cat as usize] += 1;
                    }
                }
            }
        }
    }

    // HighCard .. RoyalFlush
    assert_eq!(
        counts,
        [1_302_540, 1_098_240, 123_552, 54_912, 10_200, 5_108, 3_744, 624, 36, 4]
    );
    assert_eq!(seen.iter().filter(|s| **s).count(), 7462);
}

#[test]
fn invalid_card_is_rejected() {
    let ev = evaluator();
    let err = ev.evaluate(OWNER, ids([1, 2, 3, 4, 52])).unwrap_err();
    assert_eq!(err, EvalError::InvalidCard(52));
}

#[test]
fn access_list_gates_evaluation() {
    let ev = HandEvaluator::new(tables(), OWNER, Chips(1_000));
    let hand = ids([35, 39, 43, 47, 51]);

    assert_eq!(ev.evaluate(7, hand), Err(EvalError::AccessDenied(7)));
    assert_eq!(ev.grant_access(7, 7), Err(EvalError::NotOwner));

    ev.grant_access(OWNER, 7).unwrap();
    assert_eq!(ev.evaluate(7, hand), Ok(RankScore(1)));

    ev.revoke_access(OWNER, 7).unwrap();
    assert_eq!(ev.evaluate(7, hand), Err(EvalError::AccessDenied(7)));
}

#[test]
fn subscription_requires_exact_payment() {
    let ev = HandEvaluator::new(tables(), OWNER, Chips(1_000));

    assert_eq!(
        ev.subscribe(9, Chips(999)),
        Err(EvalError::IncorrectPayment {
            expected: 1_000,
            got: 999
        })
    );
    assert!(!ev.has_access(9).unwrap());

    ev.subscribe(9, Chips(1_000)).unwrap();
    assert!(ev.has_access(9).unwrap());

    assert_eq!(ev.withdraw_earnings(9), Err(EvalError::NotOwner));
    assert_eq!(ev.withdraw_earnings(OWNER), Ok(Chips(1_000)));
    assert_eq!(ev.withdraw_earnings(OWNER), Err(EvalError::NothingToWithdraw));
}

fn upload_all(upload: &mut TableUpload, batch_size: usize) {
    let source = tables();
    for kind in TableKind::ALL {
        for batch in source.batches(kind, batch_size) {
            upload.upload_batch(OWNER, batch).unwrap();
        }
        assert!(upload.is_complete(kind));
    }
}

#[test]
fn batched_upload_builds_identical_tables() {
    let mut upload = TableUpload::new(OWNER, 1_000);
    upload_all(&mut upload, 1_000);
    let loaded = upload.finish().unwrap();

    for kind in TableKind::ALL {
        assert_eq!(loaded.raw(kind), tables().raw(kind), "{kind:?}");
    }
    assert_eq!(
        loaded.score_five(ids([1, 2, 3, 4, 5])).unwrap(),
        RankScore(322)
    );
}

#[test]
fn upload_enforces_sequence_owner_and_immutability() {
    let source = tables();
    let mut upload = TableUpload::new(OWNER, 1_000);
    let suits = source.batches(TableKind::Suits, 1_000);

    assert_eq!(
        upload.upload_batch(5, suits[0].clone()),
        Err(EvalError::NotOwner)
    );
    assert_eq!(
        upload.upload_batch(OWNER, suits[1].clone()),
        Err(EvalError::BatchOutOfOrder {
            kind: TableKind::Suits,
            expected: 0,
            got: 1
        })
    );

    let short = TableBatch {
        values: suits[0].values[..10].to_vec(),
        ..suits[0].clone()
    };
    assert!(matches!(
        upload.upload_batch(OWNER, short),
        Err(EvalError::BatchSizeMismatch { .. })
    ));

    upload.upload_batch(OWNER, suits[0].clone()).unwrap();
    assert_eq!(upload.next_batch(TableKind::Suits), 1);

    // Незаконченную загрузку закрыть нельзя.
    assert_eq!(
        upload.clone().finish().err(),
        Some(EvalError::TableIncomplete(TableKind::Suits))
    );

    // DP-таблица помещается в один батч; повтор после заполнения отклоняется.
    let dp = source.batches(TableKind::Dp, 1_000);
    assert_eq!(dp.len(), 1);
    upload.upload_batch(OWNER, dp[0].clone()).unwrap();
    assert_eq!(
        upload.upload_batch(OWNER, dp[0].clone()),
        Err(EvalError::TableAlreadyLoaded(TableKind::Dp))
    );
}

/// Загрузить все таблицы, подменив значения одной из них.
fn upload_with(kind_to_patch: TableKind, value: u32) -> TableUpload {
    let source = tables();
    let mut upload = TableUpload::new(OWNER, 1_000);
    for kind in TableKind::ALL {
        for mut batch in source.batches(kind, 1_000) {
            if kind == kind_to_patch {
                batch.values.iter_mut().for_each(|v| *v = value);
            }
            upload.upload_batch(OWNER, batch).unwrap();
        }
    }
    upload
}

#[test]
fn corrupted_tables_never_panic() {
    // dp, уводящий hash далеко за пределы noflush, отсекается при сборке.
    assert_eq!(
        upload_with(TableKind::Dp, 100_000).finish().err(),
        Some(EvalError::ValueOutOfRange(TableKind::Dp))
    );
    assert_eq!(
        upload_with(TableKind::Suits, 9).finish().err(),
        Some(EvalError::ValueOutOfRange(TableKind::Suits))
    );
    assert_eq!(
        upload_with(TableKind::NoFlush, 7_463).finish().err(),
        Some(EvalError::ValueOutOfRange(TableKind::NoFlush))
    );

    // Каждое значение в допустимом диапазоне, но сумма всё равно мимо таблицы.
    let skewed = upload_with(TableKind::Dp, 6_175).finish().unwrap();
    assert_eq!(
        skewed.score_five(ids([1, 2, 3, 4, 5])),
        Err(EvalError::MalformedHand)
    );
}
