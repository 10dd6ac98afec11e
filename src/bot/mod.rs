//! Bot participants: personality models, rosters, and the wager policy.

pub mod decision;
pub mod models;

pub use decision::{BotWagerPolicy, COME_OUT_EAGERNESS, MID_SERIES_CAUTION, WagerIntent};
pub use models::{BotProfile, Personality, PersonalityProvider, StaticRoster, Strategy};
