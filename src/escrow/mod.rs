//! Pooled liquidity escrow: provider records, pro-rata allocation, and the
//! atomic round-result commit.

pub mod errors;
pub mod models;
pub mod pool;

pub use errors::{EscrowError, EscrowResult};
pub use models::{LiquidityProvider, LpId, LpStanding};
pub use pool::EscrowPool;
