//! Table orchestration: configuration, roll sources, and the round driver.
//!
//! A [`CrapsTable`] bundles one state machine, one wager book, and one escrow
//! pool into an isolated unit and runs the turn-based round loop:
//! open betting → collect wagers → request the roll → settle → commit escrow.

pub mod config;
pub mod roll_source;
pub mod round;

pub use config::{DEFAULT_ROLL_WAIT, TableConfig};
pub use roll_source::{LocalRollSource, RollProvenance, RollSource, RollSourceError};
pub use round::{CrapsTable, RoundError, RoundReport, WagerOutcome};
