//! External roll sources.
//!
//! The engine never rolls its own dice silently: rolls come from a
//! [`RollSource`], which may be an on-chain randomness oracle, a network
//! service, or the bundled local RNG. A source declares its provenance so
//! rounds settled on fabricated rolls are reported as unverified.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use thiserror::Error;

use crate::game::entities::{DiceRoll, SeriesId};

/// Roll source failures. Retry policy belongs to the caller.
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum RollSourceError {
    #[error("roll request timed out")]
    Timeout,
    #[error("roll source unavailable: {0}")]
    Unavailable(String),
}

/// Where a source's rolls come from.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RollProvenance {
    /// Externally verifiable randomness (oracle, VRF, ...).
    Verified,
    /// Fabricated locally; rounds settled on these are marked unverified.
    Local,
}

/// An asynchronous producer of dice rolls.
#[async_trait]
pub trait RollSource: Send + Sync {
    /// Produce the next roll for `series_id`. May take unbounded time; the
    /// round driver wraps the call in a caller-supplied timeout.
    async fn request_roll(&self, series_id: SeriesId) -> Result<DiceRoll, RollSourceError>;

    /// Provenance of this source's rolls.
    fn provenance(&self) -> RollProvenance;
}

/// Local RNG-backed source for simulation and tests.
#[derive(Debug)]
pub struct LocalRollSource {
    rng: Mutex<StdRng>,
}

impl LocalRollSource {
    /// Seeded constructor for reproducible simulations.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// OS-entropy constructor.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

#[async_trait]
impl RollSource for LocalRollSource {
    async fn request_roll(&self, _series_id: SeriesId) -> Result<DiceRoll, RollSourceError> {
        let (die1, die2) = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| RollSourceError::Unavailable("rng poisoned".to_string()))?;
            (rng.random_range(1..=6), rng.random_range(1..=6))
        };
        DiceRoll::new(die1, die2)
            .map_err(|err| RollSourceError::Unavailable(err.to_string()))
    }

    fn provenance(&self) -> RollProvenance {
        RollProvenance::Local
    }
}
