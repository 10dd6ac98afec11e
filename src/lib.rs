//! # Pooled Craps
//!
//! A craps table simulation with pooled liquidity: a dice-driven phase state
//! machine, deterministic wager settlement, personality-driven bot bettors,
//! and a pro-rata escrow pool that absorbs each round's profit and loss.
//!
//! ## Architecture
//!
//! A round moves through a fixed, turn-based sequence:
//!
//! - **Open betting**: the wager book's window opens for the coming roll
//! - **Collect wagers**: bots decide via their personality profile; external
//!   callers submit through the same sink
//! - **Roll**: an external [`table::RollSource`] produces the dice outcome
//!   under a caller-supplied timeout (the window is closed the moment the
//!   roll is requested)
//! - **Settle**: every open wager is judged against the roll and the
//!   pre-roll phase/point as one logical transaction
//! - **Escrow**: the round's net profit/loss is split pro-rata across
//!   liquidity providers, atomically or not at all
//!
//! ## Core Modules
//!
//! - [`game`]: roll/phase/wager value types, the series state machine, the
//!   bet catalog, pure settlement, and the wager book
//! - [`bot`]: bot personalities, rosters, and the wager decision policy
//! - [`escrow`]: liquidity-provider accounting and pro-rata allocation
//! - [`table`]: round orchestration and roll sources
//!
//! ## Example
//!
//! ```
//! use pooled_craps::{CrapsTable, StaticRoster, TableConfig};
//!
//! let mut table = CrapsTable::new(TableConfig::default(), &StaticRoster::house_table());
//! table.add_liquidity("lp-1", 10_000).unwrap();
//! table.start_series("shooter".to_string()).unwrap();
//! table.open_betting().unwrap();
//! ```

/// Bot participants and wager decisions.
pub mod bot;
pub use bot::{
    BotProfile, BotWagerPolicy, Personality, PersonalityProvider, StaticRoster, Strategy,
    WagerIntent,
};

/// Core game logic: entities, state machine, catalog, settlement, book.
pub mod game;
pub use game::{
    BetCatalog, BetType, Chips, CrapsGame, DiceRoll, GameError, GameStateSnapshot, Phase, Point,
    Proposition, RollOutcome, SeriesEndBehavior, SettlementEngine, TableLimits, Wager, WagerBook,
    WagerError, WagerStatus,
};

/// Liquidity-provider escrow.
pub mod escrow;
pub use escrow::{EscrowError, EscrowPool, LiquidityProvider, LpStanding};

/// Round orchestration.
pub mod table;
pub use table::{
    CrapsTable, LocalRollSource, RollProvenance, RollSource, RollSourceError, RoundError,
    RoundReport, TableConfig, WagerOutcome,
};
