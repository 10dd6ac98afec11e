//! Open-wager book with an enforced betting window.
//!
//! The window is a state, not a convention: once the round driver requests a
//! roll the window closes, and nothing is accepted until the driver reopens
//! it for the next round. Settled wagers are archived rather than dropped so
//! reporting layers can show the round's history.

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::BetCatalog;
use super::entities::{
    BetType, Chips, ParticipantId, Phase, Point, TableLimits, Wager, WagerId, WagerStatus,
};
use super::settlement::{Resolution, SettledWager};

/// Reasons a wager submission is rejected. All are reported to the caller and
/// leave the book untouched.
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum WagerError {
    #[error("betting window is closed")]
    WindowClosed,
    #[error("wager amount must be positive")]
    InvalidAmount,
    #[error("wager of {amount} outside table limits [{min}, {max}]")]
    OutsideLimits {
        amount: Chips,
        min: Chips,
        max: Chips,
    },
    #[error("{bet_type} can't be placed while {phase}")]
    WrongPhase { bet_type: BetType, phase: Phase },
}

/// Tracks open wagers for one table and enforces betting-window rules.
#[derive(Debug)]
pub struct WagerBook {
    limits: TableLimits,
    window_open: bool,
    next_id: WagerId,
    open: Vec<Wager>,
    archive: Vec<Wager>,
}

impl WagerBook {
    #[must_use]
    pub fn new(limits: TableLimits) -> Self {
        Self {
            limits,
            window_open: false,
            next_id: 1,
            open: Vec::new(),
            archive: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_window_open(&self) -> bool {
        self.window_open
    }

    /// Reopen the betting window for the next round.
    pub fn open_window(&mut self) {
        self.window_open = true;
    }

    /// Close the window; called when the roll has been requested.
    pub fn close_window(&mut self) {
        self.window_open = false;
    }

    #[must_use]
    pub fn open_wagers(&self) -> &[Wager] {
        &self.open
    }

    #[must_use]
    pub fn archived_wagers(&self) -> &[Wager] {
        &self.archive
    }

    /// Accept a wager into the book.
    ///
    /// # Errors
    ///
    /// Rejected with a [`WagerError`] when the window is closed, the amount
    /// is zero or outside table limits, or the bet type isn't valid for the
    /// current phase.
    pub fn place(
        &mut self,
        bettor_id: ParticipantId,
        bet_type: BetType,
        amount: Chips,
        phase: Phase,
        point: Option<Point>,
    ) -> Result<WagerId, WagerError> {
        if !self.window_open {
            return Err(WagerError::WindowClosed);
        }
        if amount == 0 {
            return Err(WagerError::InvalidAmount);
        }
        if amount < self.limits.min_bet || amount > self.limits.max_bet {
            return Err(WagerError::OutsideLimits {
                amount,
                min: self.limits.min_bet,
                max: self.limits.max_bet,
            });
        }
        if !BetCatalog::valid_in_phase(bet_type, phase) {
            return Err(WagerError::WrongPhase { bet_type, phase });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.open.push(Wager {
            id,
            bettor_id,
            bet_type,
            amount,
            placed_in_phase: phase,
            placed_at_point: point,
            come_point: None,
            status: WagerStatus::Open,
        });
        Ok(id)
    }

    /// Commit a round's verdicts: statuses update, come points attach, and
    /// resolved wagers move to the archive. Entries for unknown wagers are
    /// logged and skipped rather than corrupting the book.
    pub fn commit(&mut self, entries: &[SettledWager]) -> Vec<Wager> {
        for entry in entries {
            let Some(wager) = self.open.iter_mut().find(|w| w.id == entry.wager_id) else {
                warn!("settlement entry for unknown wager {}", entry.wager_id);
                continue;
            };
            match entry.resolution {
                Resolution::Won { .. } => wager.status = WagerStatus::Won,
                Resolution::Lost => wager.status = WagerStatus::Lost,
                Resolution::Pushed => wager.status = WagerStatus::Pushed,
                Resolution::ComePoint(point) => wager.come_point = Some(point),
                Resolution::StillOpen => {}
            }
        }
        let resolved: Vec<Wager> = self
            .open
            .iter()
            .filter(|w| !w.is_open())
            .cloned()
            .collect();
        self.open.retain(Wager::is_open);
        self.archive.extend(resolved.iter().cloned());
        resolved
    }
}
