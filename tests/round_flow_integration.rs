//! Integration tests for full round flow scenarios
//!
//! These tests drive a funded table through complete betting → roll →
//! settlement → escrow cycles using a scripted roll source.

use std::time::Duration;

use async_trait::async_trait;
use pooled_craps::{
    BetType, CrapsTable, DiceRoll, Phase, RollOutcome, RollProvenance, RollSource,
    RollSourceError, StaticRoster, TableConfig, WagerIntent, WagerStatus,
};

/// Replays a fixed script of rolls, in order.
struct ScriptedRolls {
    rolls: std::sync::Mutex<Vec<DiceRoll>>,
}

impl ScriptedRolls {
    fn new(pairs: &[(u8, u8)]) -> Self {
        let mut rolls: Vec<DiceRoll> = pairs
            .iter()
            .map(|(d1, d2)| DiceRoll::new(*d1, *d2).unwrap())
            .collect();
        rolls.reverse();
        Self {
            rolls: std::sync::Mutex::new(rolls),
        }
    }
}

#[async_trait]
impl RollSource for ScriptedRolls {
    async fn request_roll(&self, _series_id: u64) -> Result<DiceRoll, RollSourceError> {
        self.rolls
            .lock()
            .map_err(|_| RollSourceError::Unavailable("poisoned".to_string()))?
            .pop()
            .ok_or_else(|| RollSourceError::Unavailable("script exhausted".to_string()))
    }

    fn provenance(&self) -> RollProvenance {
        RollProvenance::Verified
    }
}

const WAIT: Duration = Duration::from_secs(1);

fn funded_table() -> CrapsTable {
    let mut table = CrapsTable::new(TableConfig::default(), &StaticRoster::default());
    table.add_liquidity("lp-1", 6_000).unwrap();
    table.add_liquidity("lp-2", 4_000).unwrap();
    table.start_series("shooter".to_string()).unwrap();
    table
}

fn intent(bettor: &str, bet_type: BetType, amount: u64) -> WagerIntent {
    WagerIntent {
        bettor_id: bettor.to_string(),
        bet_type,
        amount,
    }
}

#[tokio::test]
async fn test_pass_line_point_made_end_to_end() {
    let mut table = funded_table();
    table.open_betting().unwrap();
    table
        .submit_wager(&intent("alice", BetType::PassLine, 50))
        .unwrap();

    // Come-out totals 6: point established, wager stays open.
    let source = ScriptedRolls::new(&[(3, 3), (2, 4)]);
    let report = table.play_round(&source, WAIT).await.unwrap();
    assert!(matches!(report.outcome, RollOutcome::PointEstablished(p) if p.value() == 6));
    assert_eq!(report.settlements.len(), 1);
    assert_eq!(report.settlements[0].status, WagerStatus::Open);
    assert_eq!(report.pool_delta, 0);
    assert_eq!(table.book().open_wagers().len(), 1);

    let snapshot = table.snapshot();
    assert_eq!(snapshot.phase, Phase::Point);
    assert_eq!(snapshot.point.unwrap().value(), 6);

    // Next roll totals 6 again: point made, wager wins exactly 1:1.
    table.open_betting().unwrap();
    let report = table.play_round(&source, WAIT).await.unwrap();
    assert!(matches!(report.outcome, RollOutcome::PointMade(p) if p.value() == 6));
    assert_eq!(report.settlements.len(), 1);
    assert_eq!(report.settlements[0].status, WagerStatus::Won);
    assert_eq!(report.settlements[0].payout, 50);
    assert_eq!(report.pool_delta, -50);
    assert!(report.verified);

    // Default series-end behavior: fresh come-out, point cleared.
    let snapshot = table.snapshot();
    assert_eq!(snapshot.phase, Phase::ComeOut);
    assert_eq!(snapshot.point, None);

    // The 50 came out of the pool pro-rata: 60/40.
    assert_eq!(table.escrow().total(), 9_950);
    let deltas: Vec<i64> = report
        .leaderboard
        .iter()
        .map(|s| s.current_balance as i64 - s.initial_deposit as i64)
        .collect();
    assert_eq!(deltas.iter().sum::<i64>(), -50);
}

#[tokio::test]
async fn test_come_out_craps_forfeits_stake_to_pool() {
    let mut table = funded_table();
    table.open_betting().unwrap();
    table
        .submit_wager(&intent("alice", BetType::PassLine, 80))
        .unwrap();

    let source = ScriptedRolls::new(&[(1, 1)]);
    let report = table.play_round(&source, WAIT).await.unwrap();
    assert_eq!(report.outcome, RollOutcome::Craps);
    assert_eq!(report.settlements[0].status, WagerStatus::Lost);
    assert_eq!(report.settlements[0].payout, 0);
    assert_eq!(report.pool_delta, 80);
    assert_eq!(table.escrow().total(), 10_080);
    // Craps doesn't end the series; the same come-out continues.
    assert_eq!(table.snapshot().phase, Phase::ComeOut);
}

#[tokio::test]
async fn test_dont_pass_push_moves_nothing() {
    let mut table = funded_table();
    table.open_betting().unwrap();
    table
        .submit_wager(&intent("bob", BetType::DontPass, 40))
        .unwrap();

    let source = ScriptedRolls::new(&[(6, 6)]);
    let report = table.play_round(&source, WAIT).await.unwrap();
    assert_eq!(report.outcome, RollOutcome::Craps);
    assert_eq!(report.settlements[0].status, WagerStatus::Pushed);
    assert_eq!(report.settlements[0].payout, 0);
    assert_eq!(report.pool_delta, 0);
    // Stake returned untouched; no debit or credit anywhere in the pool.
    assert_eq!(table.escrow().total(), 10_000);
    assert_eq!(table.book().open_wagers().len(), 0);
    assert_eq!(table.book().archived_wagers()[0].status, WagerStatus::Pushed);
}

#[tokio::test]
async fn test_come_bet_rides_its_own_point() {
    let mut table = funded_table();
    table.open_betting().unwrap();

    // Establish the main point first.
    let source = ScriptedRolls::new(&[(2, 2), (4, 5), (4, 5)]);
    table.play_round(&source, WAIT).await.unwrap();
    assert_eq!(table.snapshot().point.unwrap().value(), 4);

    // Come bet placed mid-series; the next roll (9) becomes its own point.
    table.open_betting().unwrap();
    table
        .submit_wager(&intent("alice", BetType::Come, 20))
        .unwrap();
    let report = table.play_round(&source, WAIT).await.unwrap();
    assert_eq!(report.outcome, RollOutcome::NoDecision);
    assert_eq!(report.settlements[0].status, WagerStatus::Open);
    let come = &table.book().open_wagers()[0];
    assert_eq!(come.come_point.unwrap().value(), 9);

    // The 9 repeats: the come bet wins even though the main point is 4.
    table.open_betting().unwrap();
    let report = table.play_round(&source, WAIT).await.unwrap();
    assert_eq!(report.outcome, RollOutcome::NoDecision);
    assert_eq!(report.settlements[0].status, WagerStatus::Won);
    assert_eq!(report.settlements[0].payout, 20);
    assert_eq!(table.snapshot().point.unwrap().value(), 4);
}

#[tokio::test]
async fn test_field_resolves_every_roll_regardless_of_phase() {
    let mut table = funded_table();
    table.open_betting().unwrap();
    table
        .submit_wager(&intent("carol", BetType::Field, 10))
        .unwrap();

    // 12 on the come-out: field pays triple while pass-line-class craps out.
    let source = ScriptedRolls::new(&[(6, 6)]);
    let report = table.play_round(&source, WAIT).await.unwrap();
    assert_eq!(report.settlements[0].status, WagerStatus::Won);
    assert_eq!(report.settlements[0].payout, 30);
    assert_eq!(report.pool_delta, -30);
}

#[tokio::test]
async fn test_report_serializes_for_display_layers() {
    let mut table = funded_table();
    table.open_betting().unwrap();
    table
        .submit_wager(&intent("alice", BetType::PassLine, 50))
        .unwrap();

    let source = ScriptedRolls::new(&[(3, 4)]);
    let report = table.play_round(&source, WAIT).await.unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"], "natural");
    assert_eq!(json["pool_delta"], -50);
    assert_eq!(json["verified"], true);
    assert_eq!(json["settlements"][0]["payout"], 50);

    let snapshot_json = serde_json::to_string(&table.snapshot()).unwrap();
    assert!(snapshot_json.contains("come_out"));
}

#[tokio::test]
async fn test_multi_round_session_conserves_chips() {
    let mut table = funded_table();
    let script = [
        (3, 3),  // point 6
        (1, 2),  // no decision
        (3, 3),  // point made
        (5, 6),  // natural on the fresh come-out
        (2, 2),  // point 4
        (3, 4),  // seven out
    ];
    let source = ScriptedRolls::new(&script);

    let mut net: i64 = 0;
    for _ in 0..script.len() {
        table.open_betting().unwrap();
        table
            .submit_wager(&intent("alice", BetType::PassLine, 25))
            .ok();
        table
            .submit_wager(&intent("bob", BetType::Field, 10))
            .unwrap();
        let report = table.play_round(&source, WAIT).await.unwrap();
        net += report.pool_delta;
        assert_eq!(table.escrow().total() as i64, 10_000 + net);
    }

    // Alice's pass-line submissions are rejected mid-series (wrong phase),
    // so 9 wagers entered the book; every one is accounted for.
    let open = table.book().open_wagers().len();
    let archived = table.book().archived_wagers().len();
    assert_eq!(open + archived, 9);
    assert_eq!(open, 0);
}
