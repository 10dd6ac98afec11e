//! Table configuration models.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::entities::TableLimits;
use crate::game::state_machine::SeriesEndBehavior;

/// Default wait for an external roll before the round aborts with a timeout.
pub const DEFAULT_ROLL_WAIT: Duration = Duration::from_secs(30);

/// Table configuration
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TableConfig {
    /// Table name
    pub name: String,

    /// Per-wager limits
    pub limits: TableLimits,

    /// Where the table lands after a pass-line decision ends a series
    pub series_end: SeriesEndBehavior,

    /// How long `play_round` waits on the roll source
    pub roll_wait: Duration,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "main".to_string(),
            limits: TableLimits::default(),
            series_end: SeriesEndBehavior::default(),
            roll_wait: DEFAULT_ROLL_WAIT,
        }
    }
}

impl TableConfig {
    /// Validate configuration consistency.
    #[must_use]
    pub fn validate(&self) -> bool {
        self.limits.min_bet > 0
            && self.limits.min_bet <= self.limits.max_bet
            && self.roll_wait > Duration::ZERO
    }
}
