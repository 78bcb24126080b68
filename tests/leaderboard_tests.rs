//! Лидерборд: сортировка, ёмкость, ничьи.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use poker_arena::domain::hand::RankScore;
use poker_arena::engine::{Leaderboard, LEADERBOARD_CAPACITY};
use poker_arena::eval::HandCategory;

fn insert(lb: &mut Leaderboard, player: u64, score: u16) -> Option<usize> {
    let category = HandCategory::from_score(RankScore(score)).unwrap();
    lb.insert(player, RankScore(score), category)
}

fn players(lb: &Leaderboard) -> Vec<u64> {
    lb.entries().iter().map(|e| e.player_id).collect()
}

fn full_board() -> Leaderboard {
    let mut lb = Leaderboard::new();
    for i in 0..LEADERBOARD_CAPACITY as u64 {
        insert(&mut lb, i, 100 + i as u16 * 100);
    }
    lb
}

#[test]
fn stays_sorted_under_random_inserts() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..200 {
        let mut lb = Leaderboard::new();
        for player in 0..rng.gen_range(1..30u64) {
            insert(&mut lb, player, rng.gen_range(1..=7462));
            assert!(lb.is_sorted());
            assert!(lb.len() <= LEADERBOARD_CAPACITY);
        }
    }
}

#[test]
fn worse_score_on_full_board_changes_nothing() {
    let mut lb = full_board();
    let before = lb.clone();

    assert_eq!(insert(&mut lb, 99, 7000), None);
    assert_eq!(lb, before);
    assert_eq!(lb.position(99), -1);
}

#[test]
fn tie_with_tenth_slot_keeps_the_earlier_entry() {
    let mut lb = full_board();
    let before = lb.clone();
    let worst = lb.entries().last().unwrap().score.0;

    assert_eq!(insert(&mut lb, 99, worst), None);
    assert_eq!(lb, before);
}

#[test]
fn better_score_evicts_the_last_entry() {
    let mut lb = full_board();
    assert_eq!(insert(&mut lb, 99, 150), Some(1));

    assert_eq!(lb.len(), LEADERBOARD_CAPACITY);
    assert_eq!(lb.position(99), 1);
    assert_eq!(lb.position(9), -1, "former tenth place falls off");
    assert!(lb.is_sorted());
}

#[test]
fn equal_scores_are_adjacent_in_insertion_order() {
    let mut lb = Leaderboard::new();
    insert(&mut lb, 1, 4000);
    insert(&mut lb, 2, 166);
    insert(&mut lb, 3, 2000);
    insert(&mut lb, 4, 166);

    assert_eq!(players(&lb), vec![2, 4, 3, 1]);
    assert_eq!(lb.winners().len(), 2);
    assert_eq!(lb.runner_ups().len(), 2);
    assert_eq!(lb.position(4), 1);
}

#[test]
fn empty_board_has_no_winners() {
    let lb = Leaderboard::new();
    assert!(lb.is_empty());
    assert!(lb.winners().is_empty());
    assert!(lb.runner_ups().is_empty());
}
