//! Escrow conservation tests for pro-rata round allocation.
//!
//! These tests verify that pool capital is conserved exactly: per-provider
//! deltas always sum to the round's realized P&L with no chips lost to
//! rounding, and the pool total matches the sum of provider balances after
//! any sequence of deposits and round results.

use pooled_craps::escrow::{EscrowError, EscrowPool};

fn sum_of_balances(pool: &EscrowPool) -> u64 {
    pool.providers().map(|lp| lp.current_balance).sum()
}

#[test]
fn test_pro_rata_split_conservation() {
    // Awkward balances and awkward nets; every split must sum exactly.
    let test_cases = vec![
        (vec![("a", 100u64), ("b", 200), ("c", 700)], 999i64),
        (vec![("a", 333), ("b", 333), ("c", 334)], -1_000),
        (vec![("a", 1), ("b", 1), ("c", 1)], 100),
        (vec![("a", 999_999), ("b", 1)], -37),
        (vec![("solo", 42)], 13),
    ];

    for (deposits, net) in test_cases {
        let mut pool = EscrowPool::new();
        for (id, amount) in &deposits {
            pool.record_deposit(id, *amount).unwrap();
        }
        let deltas = pool.pro_rata_deltas(net);
        let total: i64 = deltas.values().sum();
        assert_eq!(
            total, net,
            "deltas for {deposits:?} at net {net} sum to {total}"
        );
    }
}

#[test]
fn test_pool_total_invariant_across_rounds() {
    let mut pool = EscrowPool::new();
    pool.record_deposit("lp-1", 5_000).unwrap();
    pool.record_deposit("lp-2", 3_000).unwrap();
    pool.record_deposit("lp-3", 2_000).unwrap();

    let mut expected_total: i64 = 10_000;
    // A winning streak, a losing streak, and a mixed tail.
    for net in [250, 250, -400, -1_250, 75, 0, -3, 999, -999, 1] {
        let deltas = pool.pro_rata_deltas(net);
        pool.apply_round_result(&deltas, net).unwrap();
        expected_total += net;

        assert_eq!(pool.total() as i64, expected_total);
        assert_eq!(sum_of_balances(&pool) as i64, expected_total);
        for lp in pool.providers() {
            assert!(
                lp.balanced(),
                "{} violates balance identity after net {net}",
                lp.id
            );
        }
    }
}

#[test]
fn test_deposits_between_rounds_shift_shares() {
    let mut pool = EscrowPool::new();
    pool.record_deposit("early", 1_000).unwrap();
    let deltas = pool.pro_rata_deltas(100);
    pool.apply_round_result(&deltas, 100).unwrap();

    // A late joiner doubles the pool; shares must reflect live balances.
    pool.record_deposit("late", 1_100).unwrap();
    assert!((pool.share_of("early").unwrap() - 0.5).abs() < 1e-9);
    assert!((pool.share_of("late").unwrap() - 0.5).abs() < 1e-9);

    let deltas = pool.pro_rata_deltas(-200);
    pool.apply_round_result(&deltas, -200).unwrap();
    assert_eq!(pool.total(), 2_000);
    assert_eq!(deltas["early"], -100);
    assert_eq!(deltas["late"], -100);
}

#[test]
fn test_rejected_round_preserves_every_balance() {
    let mut pool = EscrowPool::new();
    pool.record_deposit("lp-1", 600).unwrap();
    pool.record_deposit("lp-2", 400).unwrap();

    let before: Vec<_> = pool.providers().cloned().collect();

    // Tampered deltas no longer net to the claimed P&L.
    let mut deltas = pool.pro_rata_deltas(-100);
    *deltas.get_mut("lp-2").unwrap() -= 5;
    let err = pool.apply_round_result(&deltas, -100).unwrap_err();
    assert!(matches!(err, EscrowError::Imbalance { .. }));

    let after: Vec<_> = pool.providers().cloned().collect();
    assert_eq!(before, after, "rejected round must not touch any balance");
}

#[test]
fn test_leaderboard_is_deterministic_under_ties() {
    let mut pool = EscrowPool::new();
    for id in ["zeta", "alpha", "mid"] {
        pool.record_deposit(id, 1_000).unwrap();
    }
    // Everyone at identical ROI; order must be id-ascending every time.
    for _ in 0..5 {
        let ids: Vec<String> = pool.leaderboard().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }
}
