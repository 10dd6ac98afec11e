use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::constants::{
    BARRED_TOTAL, CRAPS_TOTALS, DEFAULT_MAX_BET, DEFAULT_MIN_BET, DIE_MAX, DIE_MIN,
    NATURAL_TOTALS, POINT_TOTALS,
};

/// Placeholder for chip amounts.
pub type Chips = u64;

/// Monotonic identifier of a dice series.
pub type SeriesId = u64;

/// Identifier of a single wager within a table's book.
pub type WagerId = u64;

/// Opaque participant identifier (human bettor or bot).
pub type ParticipantId = String;

/// Errors constructing game value types.
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum EntityError {
    #[error("die face {0} out of range [1,6]")]
    InvalidDie(u8),
    #[error("{0} is not a point total")]
    InvalidPoint(u8),
}

/// An immutable two-die outcome.
///
/// The sequence number is assigned by the state machine when the roll is
/// applied to a series; roll sources leave it at zero.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct DiceRoll {
    die1: u8,
    die2: u8,
    sequence_number: u64,
}

impl DiceRoll {
    pub fn new(die1: u8, die2: u8) -> Result<Self, EntityError> {
        for die in [die1, die2] {
            if !(DIE_MIN..=DIE_MAX).contains(&die) {
                return Err(EntityError::InvalidDie(die));
            }
        }
        Ok(Self {
            die1,
            die2,
            sequence_number: 0,
        })
    }

    #[must_use]
    pub const fn die1(&self) -> u8 {
        self.die1
    }

    #[must_use]
    pub const fn die2(&self) -> u8 {
        self.die2
    }

    #[must_use]
    pub const fn total(&self) -> u8 {
        self.die1 + self.die2
    }

    #[must_use]
    pub const fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    /// Copy of this roll stamped with its position within a series.
    #[must_use]
    pub const fn stamped(self, sequence_number: u64) -> Self {
        Self {
            sequence_number,
            ..self
        }
    }

    /// Come-out winner for the pass line (7 or 11).
    #[must_use]
    pub fn is_natural(&self) -> bool {
        NATURAL_TOTALS.contains(&self.total())
    }

    /// Come-out loser for the pass line (2, 3, or 12).
    #[must_use]
    pub fn is_craps(&self) -> bool {
        CRAPS_TOTALS.contains(&self.total())
    }

    /// Total that would establish a point.
    #[must_use]
    pub fn is_point_total(&self) -> bool {
        POINT_TOTALS.contains(&self.total())
    }

    /// Both dice show the same face.
    #[must_use]
    pub const fn is_hard(&self) -> bool {
        self.die1 == self.die2
    }

    /// The come-out total barred for don't-pass ("bar the 12").
    #[must_use]
    pub fn is_barred(&self) -> bool {
        self.total() == BARRED_TOTAL
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} ({})", self.die1, self.die2, self.total())
    }
}

/// Table phase for the dice series.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No series in flight.
    Idle,
    /// A series is running but no point is set.
    ComeOut,
    /// A point is established and must repeat before a 7.
    Point,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Idle => "idle",
            Self::ComeOut => "come-out",
            Self::Point => "point",
        };
        write!(f, "{repr}")
    }
}

/// A validated point total. Only 4, 5, 6, 8, 9, and 10 are constructible.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Point(u8);

impl Point {
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Point {
    type Error = EntityError;

    fn try_from(total: u8) -> Result<Self, Self::Error> {
        if POINT_TOTALS.contains(&total) {
            Ok(Self(total))
        } else {
            Err(EntityError::InvalidPoint(total))
        }
    }
}

impl From<Point> for u8 {
    fn from(point: Point) -> Self {
        point.0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-roll proposition bets. Each resolves on every roll.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Proposition {
    /// Any 7.
    AnySeven,
    /// Any craps (2, 3, or 12).
    AnyCraps,
    /// Exactly 11.
    YoEleven,
    /// Exactly 2.
    Aces,
    /// Exactly 12.
    Boxcars,
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::AnySeven => "any seven",
            Self::AnyCraps => "any craps",
            Self::YoEleven => "yo",
            Self::Aces => "aces",
            Self::Boxcars => "boxcars",
        };
        write!(f, "{repr}")
    }
}

/// Supported wager kinds.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    PassLine,
    DontPass,
    Come,
    DontCome,
    Field,
    Proposition(Proposition),
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassLine => write!(f, "pass line"),
            Self::DontPass => write!(f, "don't pass"),
            Self::Come => write!(f, "come"),
            Self::DontCome => write!(f, "don't come"),
            Self::Field => write!(f, "field"),
            Self::Proposition(prop) => write!(f, "{prop}"),
        }
    }
}

/// Lifecycle of a wager. A wager resolves exactly once.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WagerStatus {
    Open,
    Won,
    Lost,
    Pushed,
}

impl fmt::Display for WagerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Open => "open",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Pushed => "pushed",
        };
        write!(f, "{repr}")
    }
}

/// A placed bet and everything needed to judge it.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Wager {
    pub id: WagerId,
    pub bettor_id: ParticipantId,
    pub bet_type: BetType,
    pub amount: Chips,
    pub placed_in_phase: Phase,
    pub placed_at_point: Option<Point>,
    /// Independent point for come/don't-come wagers, set by the roll that
    /// establishes it.
    pub come_point: Option<Point>,
    pub status: WagerStatus,
}

impl Wager {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == WagerStatus::Open
    }
}

impl fmt::Display for Wager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x{} by {} [{}]",
            self.bet_type, self.amount, self.bettor_id, self.status
        )
    }
}

/// A human bettor. Bots carry additional personality data in [`crate::bot`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

/// Per-wager table limits.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct TableLimits {
    pub min_bet: Chips,
    pub max_bet: Chips,
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            min_bet: DEFAULT_MIN_BET,
            max_bet: DEFAULT_MAX_BET,
        }
    }
}
