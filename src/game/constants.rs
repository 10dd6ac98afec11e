//! Game-wide constants.

use super::entities::Chips;

/// Default table minimum for a single wager.
pub const DEFAULT_MIN_BET: Chips = 5;

/// Default table maximum for a single wager.
pub const DEFAULT_MAX_BET: Chips = 500;

/// Smallest face a die can show.
pub const DIE_MIN: u8 = 1;

/// Largest face a die can show.
pub const DIE_MAX: u8 = 6;

/// Totals that establish a point on the come-out roll.
pub const POINT_TOTALS: [u8; 6] = [4, 5, 6, 8, 9, 10];

/// Totals that win for the pass line on the come-out roll.
pub const NATURAL_TOTALS: [u8; 2] = [7, 11];

/// Totals that lose for the pass line on the come-out roll.
pub const CRAPS_TOTALS: [u8; 3] = [2, 3, 12];

/// The total that is barred (pushes) for don't-pass on the come-out roll.
pub const BARRED_TOTAL: u8 = 12;
