//! Расчёт банка: сохранение суммы, ничьи, комиссия, книга выплат.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use poker_arena::domain::chips::Chips;
use poker_arena::domain::config::SplitConfig;
use poker_arena::domain::hand::RankScore;
use poker_arena::engine::errors::EngineError;
use poker_arena::engine::settlement::{plan, Ledger};
use poker_arena::engine::Leaderboard;
use poker_arena::eval::HandCategory;

fn board(scores: &[u16]) -> Leaderboard {
    let mut lb = Leaderboard::new();
    for (i, &s) in scores.iter().enumerate() {
        let category = HandCategory::from_score(RankScore(s)).unwrap();
        lb.insert(100 + i as u64, RankScore(s), category);
    }
    lb
}

#[test]
fn value_is_conserved_for_random_games() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let players = rng.gen_range(2..=10usize);
        // узкий диапазон score – чтобы чаще были ничьи
        let scores: Vec<u16> = (0..players).map(|_| rng.gen_range(1..=20)).collect();
        let total = Chips(rng.gen_range(1..=5_000_000u64));
        let split = SplitConfig {
            house_cut_bps: rng.gen_range(0..=2_000),
            winner_pct: 70,
            runner_up_pct: 30,
        };

        let lb = board(&scores);
        let p = plan(total, lb.entries(), &split);

        assert_eq!(p.credited_total() + p.house_take, total);
        assert!(p.house_take >= p.house_cut);
        assert_eq!(p.house_cut, Chips(total.0 * split.house_cut_bps as u64 / 10_000));

        let mut ledger = Ledger::new();
        ledger.apply(&p).unwrap();
        let balances: Chips = ledger.balances().values().copied().sum();
        assert_eq!(balances + ledger.house_balance(), total);
    }
}

#[test]
fn two_tied_winners_split_the_winner_share() {
    let split = SplitConfig::default(); // 5% дому, 80/20
    let lb = board(&[166, 166, 2000]);
    let total = Chips(100_000);
    let p = plan(total, lb.entries(), &split);

    // claim = 95_000; winners: 95_000 * 80 / 100 / 2
    assert_eq!(p.claim_pot, Chips(95_000));
    assert_eq!(p.winner_share_each, Chips(38_000));
    assert_eq!(p.runner_up_share_each, Chips(19_000));
    assert_eq!(
        p.credits,
        vec![(100, Chips(38_000)), (101, Chips(38_000)), (102, Chips(19_000))]
    );
    assert_eq!(lb.position(100) + 1, lb.position(101));
    assert_eq!(p.house_take, Chips(5_000));
}

#[test]
fn indivisible_remainders_go_to_the_house() {
    let split = SplitConfig {
        house_cut_bps: 0,
        winner_pct: 80,
        runner_up_pct: 20,
    };
    let lb = board(&[10, 10, 10, 500, 600, 700]);
    let p = plan(Chips(1_000), lb.entries(), &split);

    // 800 / 3 = 266 (остаток 2), 200 / 3 = 66 (остаток 2)
    assert_eq!(p.winner_share_each, Chips(266));
    assert_eq!(p.runner_up_share_each, Chips(66));
    assert_eq!(p.house_take, Chips(4));
}

#[test]
fn ledger_withdraw_zeroes_and_then_fails() {
    let mut ledger = Ledger::new();
    ledger.credit(5, Chips(700)).unwrap();
    ledger.credit(5, Chips(300)).unwrap();
    ledger.credit_house(Chips(50)).unwrap();

    assert_eq!(ledger.withdraw(5), Ok(Chips(1_000)));
    assert_eq!(ledger.balance(5), Chips::ZERO);
    assert_eq!(ledger.withdraw(5), Err(EngineError::NothingToWithdraw));

    assert_eq!(ledger.withdraw_house(), Ok(Chips(50)));
    assert_eq!(ledger.withdraw_house(), Err(EngineError::NothingToWithdraw));
}

#[test]
fn ledger_apply_is_all_or_nothing() {
    let mut ledger = Ledger::new();
    ledger.credit_house(Chips(u64::MAX - 10)).unwrap();
    let before = ledger.clone();

    // игрокам зачисление проходит, а дом переполняется
    let lb = board(&[5, 6]);
    let p = plan(Chips(1_000), lb.entries(), &SplitConfig::default());

    assert_eq!(ledger.apply(&p), Err(EngineError::Overflow));
    assert_eq!(ledger, before);
    assert_eq!(ledger.balance(100), Chips::ZERO);
}
