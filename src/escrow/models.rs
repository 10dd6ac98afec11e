//! Liquidity-provider records.

use serde::{Deserialize, Serialize};

use crate::game::entities::Chips;

/// Liquidity provider identifier
pub type LpId = String;

/// One provider's stake in the pool.
///
/// Invariant outside an in-flight settlement:
/// `current_balance = initial_deposit + cumulative_winnings - cumulative_losses`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LiquidityProvider {
    pub id: LpId,
    pub initial_deposit: Chips,
    pub current_balance: Chips,
    pub cumulative_winnings: Chips,
    pub cumulative_losses: Chips,
}

impl LiquidityProvider {
    #[must_use]
    pub fn new(id: LpId, deposit: Chips) -> Self {
        Self {
            id,
            initial_deposit: deposit,
            current_balance: deposit,
            cumulative_winnings: 0,
            cumulative_losses: 0,
        }
    }

    /// Return on investment: `(current - initial) / initial`.
    #[must_use]
    pub fn roi(&self) -> f64 {
        if self.initial_deposit == 0 {
            return 0.0;
        }
        (self.current_balance as f64 - self.initial_deposit as f64) / self.initial_deposit as f64
    }

    /// Whether the balance identity holds.
    #[must_use]
    pub fn balanced(&self) -> bool {
        let expected = self.initial_deposit as i128 + self.cumulative_winnings as i128
            - self.cumulative_losses as i128;
        expected == self.current_balance as i128
    }
}

/// One leaderboard row: a provider ranked by ROI.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct LpStanding {
    pub id: LpId,
    pub initial_deposit: Chips,
    pub current_balance: Chips,
    pub roi: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_provider_is_balanced() {
        let lp = LiquidityProvider::new("lp-1".to_string(), 1_000);
        assert!(lp.balanced());
        assert_eq!(lp.roi(), 0.0);
    }

    #[test]
    fn test_roi_tracks_gains_and_losses() {
        let mut lp = LiquidityProvider::new("lp-1".to_string(), 1_000);
        lp.current_balance = 1_250;
        lp.cumulative_winnings = 250;
        assert!(lp.balanced());
        assert!((lp.roi() - 0.25).abs() < f64::EPSILON);

        lp.current_balance = 750;
        lp.cumulative_winnings = 0;
        lp.cumulative_losses = 250;
        assert!(lp.balanced());
        assert!((lp.roi() + 0.25).abs() < f64::EPSILON);
    }
}
