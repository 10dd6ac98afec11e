//! Craps game engine - state machine, catalog, settlement, and wager book.
//!
//! This module provides the dice-facing core:
//! - Value types for rolls, phases, points, and wagers
//! - The series state machine (come-out/point transitions)
//! - The static bet catalog with payout ratios
//! - Pure wager resolution and per-round settlement
//! - The open-wager book with its enforced betting window

pub mod catalog;
pub mod constants;
pub mod entities;
pub mod settlement;
pub mod state_machine;
pub mod wager_book;

pub use catalog::{BetCatalog, BetDefinition, Payout};
pub use entities::{
    BetType, Chips, DiceRoll, EntityError, Participant, ParticipantId, Phase, Point, Proposition,
    SeriesId, TableLimits, Wager, WagerId, WagerStatus,
};
pub use settlement::{Resolution, RoundSettlement, SettledWager, SettlementEngine, resolve};
pub use state_machine::{
    CrapsGame, GameError, GameSeries, GameStateSnapshot, RollOutcome, SeriesEndBehavior,
};
pub use wager_book::{WagerBook, WagerError};
