//! Static wager catalog: which bets exist, where they may be placed, and what
//! they pay.
//!
//! Payouts are expressed as `num:den` winnings over the stake, so a winning
//! pass-line wager of 50 pays 50 in winnings on top of the returned stake.
//! Field payouts depend on the roll total (double on 2, triple on 12).

use serde::{Deserialize, Serialize};

use super::entities::{BetType, Chips, Phase, Proposition};

/// A winnings ratio over the stake.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Payout {
    pub num: u64,
    pub den: u64,
}

impl Payout {
    pub const EVEN: Self = Self::new(1, 1);

    #[must_use]
    pub const fn new(num: u64, den: u64) -> Self {
        Self { num, den }
    }

    /// Winnings for a stake of `amount`, excluding the returned stake.
    #[must_use]
    pub const fn winnings(&self, amount: Chips) -> Chips {
        amount * self.num / self.den
    }
}

/// Catalog entry for one bet type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BetDefinition {
    pub bet_type: BetType,
    pub valid_phases: &'static [Phase],
    /// Whether the bet resolves on every roll regardless of phase.
    pub one_roll: bool,
}

const LINE_PHASES: &[Phase] = &[Phase::ComeOut];
const POINT_PHASES: &[Phase] = &[Phase::Point];
const ANY_ACTIVE_PHASE: &[Phase] = &[Phase::ComeOut, Phase::Point];

/// Static table of supported wagers.
#[derive(Clone, Copy, Debug, Default)]
pub struct BetCatalog;

impl BetCatalog {
    /// Definition for a bet type. Total over the enum, so unknown bet types
    /// are unrepresentable.
    #[must_use]
    pub fn definition(bet_type: BetType) -> BetDefinition {
        let (valid_phases, one_roll) = match bet_type {
            BetType::PassLine | BetType::DontPass => (LINE_PHASES, false),
            BetType::Come | BetType::DontCome => (POINT_PHASES, false),
            BetType::Field => (ANY_ACTIVE_PHASE, true),
            BetType::Proposition(_) => (ANY_ACTIVE_PHASE, true),
        };
        BetDefinition {
            bet_type,
            valid_phases,
            one_roll,
        }
    }

    /// Whether `bet_type` may be placed while the table is in `phase`.
    #[must_use]
    pub fn valid_in_phase(bet_type: BetType, phase: Phase) -> bool {
        Self::definition(bet_type).valid_phases.contains(&phase)
    }

    /// Winnings ratio for a winning wager, given the roll total that won it.
    #[must_use]
    pub fn payout_for(bet_type: BetType, total: u8) -> Payout {
        match bet_type {
            BetType::PassLine | BetType::DontPass | BetType::Come | BetType::DontCome => {
                Payout::EVEN
            }
            BetType::Field => match total {
                2 => Payout::new(2, 1),
                12 => Payout::new(3, 1),
                _ => Payout::EVEN,
            },
            BetType::Proposition(prop) => match prop {
                Proposition::AnySeven => Payout::new(4, 1),
                Proposition::AnyCraps => Payout::new(7, 1),
                Proposition::YoEleven => Payout::new(15, 1),
                Proposition::Aces | Proposition::Boxcars => Payout::new(30, 1),
            },
        }
    }
}
