//! Pooled-capital escrow with pro-rata profit/loss allocation.
//!
//! The pool absorbs each round's realized P&L and splits it across liquidity
//! providers in proportion to their capital share. Round application is a
//! two-phase commit: every delta is validated against the round's realized
//! P&L and every provider balance before anything mutates, so a rejected
//! round leaves the pool untouched.

use log::{debug, error};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::errors::{EscrowError, EscrowResult};
use super::models::{LiquidityProvider, LpId, LpStanding};
use crate::game::entities::Chips;

/// Liquidity-provider capital for one table.
#[derive(Debug, Default)]
pub struct EscrowPool {
    // BTreeMap keeps iteration order deterministic for splits and reports.
    providers: BTreeMap<LpId, LiquidityProvider>,
}

impl EscrowPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn providers(&self) -> impl Iterator<Item = &LiquidityProvider> {
        self.providers.values()
    }

    /// Total pooled capital.
    #[must_use]
    pub fn total(&self) -> Chips {
        self.providers
            .values()
            .fold(0, |acc: Chips, lp| acc.saturating_add(lp.current_balance))
    }

    /// Credit a deposit to `lp_id`, creating the provider on first deposit.
    ///
    /// # Errors
    ///
    /// `EscrowError::InvalidAmount` if `amount` is zero.
    pub fn record_deposit(&mut self, lp_id: &str, amount: Chips) -> EscrowResult<()> {
        if amount == 0 {
            return Err(EscrowError::InvalidAmount(amount));
        }
        match self.providers.get_mut(lp_id) {
            Some(lp) => {
                lp.initial_deposit = lp
                    .initial_deposit
                    .checked_add(amount)
                    .ok_or_else(|| EscrowError::BalanceOverflow(lp_id.to_string()))?;
                lp.current_balance = lp
                    .current_balance
                    .checked_add(amount)
                    .ok_or_else(|| EscrowError::BalanceOverflow(lp_id.to_string()))?;
            }
            None => {
                self.providers.insert(
                    lp_id.to_string(),
                    LiquidityProvider::new(lp_id.to_string(), amount),
                );
            }
        }
        debug!("deposit {amount} from {lp_id}, pool now {}", self.total());
        Ok(())
    }

    /// Fraction of the pool owned by `lp_id`. Recomputed from live balances,
    /// never cached across a mutating operation.
    ///
    /// # Errors
    ///
    /// `EscrowError::UnknownProvider` if the provider doesn't exist.
    pub fn share_of(&self, lp_id: &str) -> EscrowResult<f64> {
        let lp = self
            .providers
            .get(lp_id)
            .ok_or_else(|| EscrowError::UnknownProvider(lp_id.to_string()))?;
        let total = self.total();
        if total == 0 {
            return Ok(0.0);
        }
        Ok(lp.current_balance as f64 / total as f64)
    }

    /// Split a round's net P&L across providers by capital share.
    ///
    /// Integer division truncates toward zero; the remainder is assigned to
    /// the largest provider (ties broken by id ascending) so the deltas
    /// always sum to exactly `net`. An empty or zero-capital pool yields an
    /// empty split.
    #[must_use]
    pub fn pro_rata_deltas(&self, net: i64) -> BTreeMap<LpId, i64> {
        let total = self
            .providers
            .values()
            .map(|lp| u128::from(lp.current_balance))
            .sum::<u128>();
        let mut deltas = BTreeMap::new();
        if total == 0 {
            return deltas;
        }

        let mut assigned: i128 = 0;
        let mut largest: Option<&LiquidityProvider> = None;
        for lp in self.providers.values() {
            let slice = i128::from(net) * i128::from(lp.current_balance) / total as i128;
            assigned += slice;
            deltas.insert(lp.id.clone(), slice as i64);
            let bigger = largest.is_none_or(|best| lp.current_balance > best.current_balance);
            if bigger {
                largest = Some(lp);
            }
        }

        let remainder = (i128::from(net) - assigned) as i64;
        if remainder != 0 {
            if let Some(lp) = largest {
                if let Some(delta) = deltas.get_mut(&lp.id) {
                    *delta += remainder;
                }
            }
        }
        deltas
    }

    /// Atomically apply a round's per-provider deltas.
    ///
    /// The deltas must net to exactly `expected_net`, the round's realized
    /// P&L backed by wager stakes and payouts. Validation happens before any
    /// mutation; on failure the round is rejected whole.
    ///
    /// # Errors
    ///
    /// `EscrowError::Imbalance` if the deltas don't net to `expected_net`,
    /// `EscrowError::UnknownProvider` for a delta naming nobody, and
    /// `EscrowError::InsufficientProviderBalance` /
    /// `EscrowError::BalanceOverflow` when a balance can't absorb its delta.
    pub fn apply_round_result(
        &mut self,
        deltas: &BTreeMap<LpId, i64>,
        expected_net: i64,
    ) -> EscrowResult<()> {
        let actual: i128 = deltas.values().map(|&d| i128::from(d)).sum();
        if actual != i128::from(expected_net) {
            error!("rejecting round: deltas net {actual}, expected {expected_net}");
            return Err(EscrowError::Imbalance {
                expected: expected_net,
                actual: actual as i64,
            });
        }

        // Validate everything first; nothing mutates on a rejected round.
        for (lp_id, &delta) in deltas {
            let lp = self
                .providers
                .get(lp_id)
                .ok_or_else(|| EscrowError::UnknownProvider(lp_id.clone()))?;
            if delta >= 0 {
                lp.current_balance
                    .checked_add(delta as Chips)
                    .ok_or_else(|| EscrowError::BalanceOverflow(lp_id.clone()))?;
            } else {
                let debit = delta.unsigned_abs();
                if lp.current_balance < debit {
                    return Err(EscrowError::InsufficientProviderBalance {
                        lp_id: lp_id.clone(),
                        balance: lp.current_balance,
                        debit,
                    });
                }
            }
        }

        for (lp_id, &delta) in deltas {
            // Presence was validated above.
            let Some(lp) = self.providers.get_mut(lp_id) else {
                continue;
            };
            if delta >= 0 {
                lp.current_balance += delta as Chips;
                lp.cumulative_winnings = lp.cumulative_winnings.saturating_add(delta as Chips);
            } else {
                let debit = delta.unsigned_abs();
                lp.current_balance -= debit;
                lp.cumulative_losses = lp.cumulative_losses.saturating_add(debit);
            }
        }
        debug!(
            "round applied: net {expected_net} across {} providers, pool now {}",
            deltas.len(),
            self.total()
        );
        Ok(())
    }

    /// Providers ranked by ROI descending, ties broken by id ascending.
    #[must_use]
    pub fn leaderboard(&self) -> Vec<LpStanding> {
        let mut standings: Vec<LpStanding> = self
            .providers
            .values()
            .map(|lp| LpStanding {
                id: lp.id.clone(),
                initial_deposit: lp.initial_deposit,
                current_balance: lp.current_balance,
                roi: lp.roi(),
            })
            .collect();
        standings.sort_by(|a, b| {
            b.roi
                .partial_cmp(&a.roi)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        standings
    }
}
