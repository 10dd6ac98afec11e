//! Escrow error types.

use thiserror::Error;

use super::models::LpId;
use crate::game::entities::Chips;

/// Escrow errors
#[derive(Debug, Eq, Error, PartialEq)]
pub enum EscrowError {
    /// Invalid amount (must be positive)
    #[error("invalid amount: {0}")]
    InvalidAmount(Chips),

    /// Unknown liquidity provider
    #[error("no liquidity provider {0}")]
    UnknownProvider(LpId),

    /// Round deltas don't net to the round's realized P&L
    #[error("escrow imbalance: deltas net to {actual}, round realized {expected}")]
    Imbalance { expected: i64, actual: i64 },

    /// A delta would drive a provider balance negative
    #[error("provider {lp_id} can't absorb {debit} (balance {balance})")]
    InsufficientProviderBalance {
        lp_id: LpId,
        balance: Chips,
        debit: Chips,
    },

    /// Balance arithmetic overflow
    #[error("balance overflow for provider {0}")]
    BalanceOverflow(LpId),
}

/// Result type for escrow operations
pub type EscrowResult<T> = Result<T, EscrowError>;
