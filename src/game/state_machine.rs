//! Dice series state machine.
//!
//! A series walks the classic craps phases: the come-out roll either resolves
//! immediately (natural or craps) or establishes a point; once a point is set
//! the series ends when the point repeats or a 7 appears. What happens after a
//! series ends is configurable via [`SeriesEndBehavior`].

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::entities::{DiceRoll, ParticipantId, Phase, Point, SeriesId};

/// Errors from series/phase misuse. Fatal to the attempted operation only.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GameError {
    #[error("can't {action} while {phase}")]
    InvalidStateTransition { phase: Phase, action: &'static str },
}

/// What a roll did to the series.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RollOutcome {
    /// Come-out 7 or 11.
    Natural,
    /// Come-out 2, 3, or 12.
    Craps,
    /// Come-out total became the point.
    PointEstablished(Point),
    /// The point repeated before a 7; the series is over.
    PointMade(Point),
    /// A 7 arrived while a point was up; the series is over.
    SevenOut,
    /// Nothing changed for the series (one-roll bets still resolve).
    NoDecision,
}

impl RollOutcome {
    /// Whether this outcome concluded the series.
    #[must_use]
    pub const fn ends_series(&self) -> bool {
        matches!(self, Self::PointMade(_) | Self::SevenOut)
    }
}

impl fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Natural => write!(f, "natural"),
            Self::Craps => write!(f, "craps"),
            Self::PointEstablished(point) => write!(f, "point {point} established"),
            Self::PointMade(point) => write!(f, "point {point} made"),
            Self::SevenOut => write!(f, "seven out"),
            Self::NoDecision => write!(f, "no decision"),
        }
    }
}

/// Where the table lands once a pass-line decision ends a series.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesEndBehavior {
    /// A fresh series begins immediately with the same shooter.
    #[default]
    NewComeOut,
    /// The table parks in idle until `start_new_series` is called.
    ReturnToIdle,
}

/// One shooter's run of rolls.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameSeries {
    pub series_id: SeriesId,
    pub phase: Phase,
    pub point: Option<Point>,
    pub shooter: ParticipantId,
    pub roll_sequence: Vec<DiceRoll>,
}

impl GameSeries {
    fn new(series_id: SeriesId, shooter: ParticipantId) -> Self {
        Self {
            series_id,
            phase: Phase::ComeOut,
            point: None,
            shooter,
            roll_sequence: Vec::new(),
        }
    }
}

/// Read-only view of the machine for display layers.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameStateSnapshot {
    pub series_id: Option<SeriesId>,
    pub phase: Phase,
    pub point: Option<Point>,
    pub last_roll: Option<DiceRoll>,
}

/// The craps phase machine. Owns the current series; `apply_roll` is the sole
/// phase-mutating operation.
#[derive(Debug)]
pub struct CrapsGame {
    end_behavior: SeriesEndBehavior,
    next_series_id: SeriesId,
    series: Option<GameSeries>,
    last_roll: Option<DiceRoll>,
}

impl CrapsGame {
    #[must_use]
    pub fn new(end_behavior: SeriesEndBehavior) -> Self {
        Self {
            end_behavior,
            next_series_id: 1,
            series: None,
            last_roll: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.series.as_ref().map_or(Phase::Idle, |s| s.phase)
    }

    #[must_use]
    pub fn point(&self) -> Option<Point> {
        self.series.as_ref().and_then(|s| s.point)
    }

    #[must_use]
    pub fn series(&self) -> Option<&GameSeries> {
        self.series.as_ref()
    }

    #[must_use]
    pub fn series_id(&self) -> Option<SeriesId> {
        self.series.as_ref().map(|s| s.series_id)
    }

    #[must_use]
    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            series_id: self.series_id(),
            phase: self.phase(),
            point: self.point(),
            last_roll: self.last_roll,
        }
    }

    /// Begin a fresh series for `shooter`.
    ///
    /// # Errors
    ///
    /// `GameError::InvalidStateTransition` if a series is already active and
    /// unresolved.
    pub fn start_new_series(&mut self, shooter: ParticipantId) -> Result<SeriesId, GameError> {
        if self.series.is_some() {
            return Err(GameError::InvalidStateTransition {
                phase: self.phase(),
                action: "start a new series",
            });
        }
        let series_id = self.allocate_series(shooter);
        debug!("series {series_id} started");
        Ok(series_id)
    }

    /// Apply a roll to the active series and report what it decided.
    ///
    /// The roll is stamped with its sequence number within the series and
    /// recorded. Phase and point move per the craps tables: come-out naturals
    /// and craps leave the table in come-out, any other come-out total
    /// becomes the point, and with a point up only the point total or a 7
    /// conclude the series.
    ///
    /// # Errors
    ///
    /// `GameError::InvalidStateTransition` if no series is active.
    pub fn apply_roll(&mut self, roll: DiceRoll) -> Result<RollOutcome, GameError> {
        let Some(series) = self.series.as_mut() else {
            return Err(GameError::InvalidStateTransition {
                phase: Phase::Idle,
                action: "apply a roll",
            });
        };

        let stamped = roll.stamped(series.roll_sequence.len() as u64 + 1);
        series.roll_sequence.push(stamped);
        self.last_roll = Some(stamped);

        let outcome = match (series.phase, series.point) {
            (Phase::ComeOut, _) => {
                if stamped.is_natural() {
                    RollOutcome::Natural
                } else if stamped.is_craps() {
                    RollOutcome::Craps
                } else {
                    // Totals 4,5,6,8,9,10 are the only remaining ones.
                    let point = Point::try_from(stamped.total())
                        .unwrap_or_else(|_| unreachable!("total {} must be a point", stamped.total()));
                    series.phase = Phase::Point;
                    series.point = Some(point);
                    RollOutcome::PointEstablished(point)
                }
            }
            (Phase::Point, Some(point)) => {
                if stamped.total() == point.value() {
                    RollOutcome::PointMade(point)
                } else if stamped.total() == 7 {
                    RollOutcome::SevenOut
                } else {
                    RollOutcome::NoDecision
                }
            }
            // `series` existing with phase Idle or Point-without-point is
            // unrepresentable through the public API.
            (phase, _) => {
                return Err(GameError::InvalidStateTransition {
                    phase,
                    action: "apply a roll",
                });
            }
        };

        debug!("roll {stamped}: {outcome}");

        if outcome.ends_series() {
            let shooter = series.shooter.clone();
            self.series = None;
            if self.end_behavior == SeriesEndBehavior::NewComeOut {
                let series_id = self.allocate_series(shooter);
                debug!("series {series_id} started (new come-out)");
            }
        }

        Ok(outcome)
    }

    fn allocate_series(&mut self, shooter: ParticipantId) -> SeriesId {
        let series_id = self.next_series_id;
        self.next_series_id += 1;
        self.series = Some(GameSeries::new(series_id, shooter));
        series_id
    }
}

impl Default for CrapsGame {
    fn default() -> Self {
        Self::new(SeriesEndBehavior::default())
    }
}
