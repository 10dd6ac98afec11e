//! Single-table round driver.
//!
//! One round is ever in flight: the betting window opens, bots and external
//! callers submit wagers, the window closes when the roll is requested, and
//! the roll settles every open wager and the escrow pool as one logical
//! transaction. A failed escrow commit rejects the round's settlement whole;
//! open wagers stay open and no balance moves.

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::config::TableConfig;
use super::roll_source::{RollProvenance, RollSource, RollSourceError};
use crate::bot::decision::{BotWagerPolicy, WagerIntent};
use crate::bot::models::{BotProfile, PersonalityProvider};
use crate::escrow::errors::EscrowError;
use crate::escrow::models::LpStanding;
use crate::escrow::pool::EscrowPool;
use crate::game::entities::{
    Chips, DiceRoll, ParticipantId, Phase, SeriesId, Wager, WagerId, WagerStatus,
};
use crate::game::settlement::{Resolution, SettlementEngine};
use crate::game::state_machine::{CrapsGame, GameError, GameStateSnapshot, RollOutcome};
use crate::game::wager_book::{WagerBook, WagerError};

/// Errors that abort a round.
#[derive(Debug, Error)]
pub enum RoundError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Roll(#[from] RollSourceError),
    #[error("round settlement rejected: {0}")]
    Escrow(#[from] EscrowError),
}

/// One wager's fate in a round report.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct WagerOutcome {
    pub wager: Wager,
    pub status: WagerStatus,
    /// Winnings excluding the returned stake; zero unless `status` is `Won`.
    pub payout: Chips,
}

/// Everything a display layer needs about a finished round.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RoundReport {
    pub series_id: SeriesId,
    pub roll: DiceRoll,
    pub outcome: RollOutcome,
    pub settlements: Vec<WagerOutcome>,
    /// The pool's realized profit (+) or loss (-) for the round.
    pub pool_delta: i64,
    pub leaderboard: Vec<LpStanding>,
    /// False when the roll was fabricated by a local source.
    pub verified: bool,
}

/// A craps table: state machine, wager book, bots, and escrow as one
/// isolated unit. A multi-table deployment runs one `CrapsTable` per table
/// with nothing shared.
pub struct CrapsTable {
    config: TableConfig,
    game: CrapsGame,
    book: WagerBook,
    escrow: EscrowPool,
    bots: Vec<BotProfile>,
}

impl CrapsTable {
    #[must_use]
    pub fn new(config: TableConfig, roster: &dyn PersonalityProvider) -> Self {
        let game = CrapsGame::new(config.series_end);
        let book = WagerBook::new(config.limits);
        Self {
            config,
            game,
            book,
            escrow: EscrowPool::new(),
            bots: roster.roster(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    #[must_use]
    pub fn escrow(&self) -> &EscrowPool {
        &self.escrow
    }

    #[must_use]
    pub fn book(&self) -> &WagerBook {
        &self.book
    }

    #[must_use]
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.game.snapshot()
    }

    /// Seed the pool that backs this table's action.
    ///
    /// # Errors
    ///
    /// See [`EscrowPool::record_deposit`].
    pub fn add_liquidity(&mut self, lp_id: &str, amount: Chips) -> Result<(), EscrowError> {
        self.escrow.record_deposit(lp_id, amount)
    }

    /// Start a new dice series for `shooter`.
    ///
    /// # Errors
    ///
    /// `GameError::InvalidStateTransition` if a series is already running.
    pub fn start_series(&mut self, shooter: ParticipantId) -> Result<SeriesId, GameError> {
        self.game.start_new_series(shooter)
    }

    /// Open the betting window for the coming roll.
    ///
    /// # Errors
    ///
    /// `GameError::InvalidStateTransition` when no series is active.
    pub fn open_betting(&mut self) -> Result<(), GameError> {
        if self.game.phase() == Phase::Idle {
            return Err(GameError::InvalidStateTransition {
                phase: Phase::Idle,
                action: "open betting",
            });
        }
        self.book.open_window();
        Ok(())
    }

    /// Wager submission sink for external callers.
    ///
    /// # Errors
    ///
    /// Rejected with a [`WagerError`] per betting-window and validation
    /// rules.
    pub fn submit_wager(&mut self, intent: &WagerIntent) -> Result<WagerId, WagerError> {
        self.book.place(
            intent.bettor_id.clone(),
            intent.bet_type,
            intent.amount,
            self.game.phase(),
            self.game.point(),
        )
    }

    /// Let every bot on the roster decide and submit for this window.
    /// Individual rejections are logged and skipped; they don't abort the
    /// other bots.
    pub fn run_bot_wagers<R: Rng>(&mut self, rng: &mut R) -> Vec<WagerId> {
        let phase = self.game.phase();
        let point = self.game.point();
        let intents: Vec<WagerIntent> = self
            .bots
            .iter()
            .filter_map(|bot| {
                BotWagerPolicy::decide(rng, bot, phase, point, &self.config.limits)
            })
            .collect();

        let mut placed = Vec::new();
        for intent in intents {
            match self.submit_wager(&intent) {
                Ok(id) => placed.push(id),
                Err(err) => warn!("bot wager from {} rejected: {err}", intent.bettor_id),
            }
        }
        placed
    }

    /// Run one complete round: close the window, await the roll (bounded by
    /// `wait`), advance the series, settle every open wager, and commit the
    /// pro-rata escrow deltas.
    ///
    /// The betting window stays closed afterwards until [`Self::open_betting`]
    /// is called for the next round.
    ///
    /// # Errors
    ///
    /// - `RoundError::Game` when no series is active
    /// - `RoundError::Roll` on timeout or source failure (no wager resolves)
    /// - `RoundError::Escrow` when the pool can't honor the round; wager
    ///   statuses, phase, and point are left untouched and nothing is
    ///   applied
    pub async fn play_round(
        &mut self,
        source: &dyn RollSource,
        wait: Duration,
    ) -> Result<RoundReport, RoundError> {
        let Some(series_id) = self.game.series_id() else {
            return Err(GameError::InvalidStateTransition {
                phase: Phase::Idle,
                action: "play a round",
            }
            .into());
        };

        // Roll requested: the window is an enforced state, not a convention.
        self.book.close_window();

        let roll = tokio::time::timeout(wait, source.request_roll(series_id))
            .await
            .map_err(|_| RollSourceError::Timeout)??;

        // Settlement judges wagers under the pre-roll state, so the escrow
        // commit can run before the state machine moves: a rejected round
        // leaves phase, point, and every wager exactly as they were.
        let phase_before = self.game.phase();
        let point_before = self.game.point();

        let settlement = SettlementEngine::settle_round(
            self.book.open_wagers(),
            roll,
            phase_before,
            point_before,
        );

        let deltas = self.escrow.pro_rata_deltas(settlement.pool_delta);
        self.escrow
            .apply_round_result(&deltas, settlement.pool_delta)?;

        let outcome = self.game.apply_roll(roll)?;

        let settlements = self.report_entries(&settlement.entries);
        self.book.commit(&settlement.entries);

        info!(
            "series {series_id}: {roll} -> {outcome}, {} wagers judged, pool delta {}",
            settlements.len(),
            settlement.pool_delta
        );

        Ok(RoundReport {
            series_id,
            roll,
            outcome,
            settlements,
            pool_delta: settlement.pool_delta,
            leaderboard: self.escrow.leaderboard(),
            verified: source.provenance() == RollProvenance::Verified,
        })
    }

    fn report_entries(
        &self,
        entries: &[crate::game::settlement::SettledWager],
    ) -> Vec<WagerOutcome> {
        entries
            .iter()
            .filter_map(|entry| {
                let mut wager = self
                    .book
                    .open_wagers()
                    .iter()
                    .find(|w| w.id == entry.wager_id)?
                    .clone();
                let (status, payout) = match entry.resolution {
                    Resolution::Won { payout } => (WagerStatus::Won, payout),
                    Resolution::Lost => (WagerStatus::Lost, 0),
                    Resolution::Pushed => (WagerStatus::Pushed, 0),
                    Resolution::ComePoint(_) | Resolution::StillOpen => (WagerStatus::Open, 0),
                };
                // The report carries the verdict, not the pre-commit book row.
                wager.status = status;
                Some(WagerOutcome {
                    wager,
                    status,
                    payout,
                })
            })
            .collect()
    }
}
