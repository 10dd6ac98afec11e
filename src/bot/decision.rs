//! Bot wager decisions driven by personality and strategy.
//!
//! All randomness comes from a caller-injected [`rand::Rng`], so fixed-seed
//! tests can assert exact intents.

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::models::{BotProfile, PERSONALITY_MAX};
use crate::game::catalog::BetCatalog;
use crate::game::entities::{BetType, Chips, ParticipantId, Phase, Point, TableLimits};

/// Multiplier applied to bet probability on the come-out roll.
///
/// **Range**: 1.0-1.5 (typical: 1.25)
/// **Effect**: bots pile in when a new shooter is coming out
pub const COME_OUT_EAGERNESS: f64 = 1.25;

/// Multiplier applied to bet probability once a point is up.
///
/// **Range**: 0.5-1.0 (typical: 0.75)
/// **Effect**: bots cool off mid-series and let line bets ride
pub const MID_SERIES_CAUTION: f64 = 0.75;

/// A bot's decision to wager, prior to submission. Submitting the intent to
/// the wager book is a separate, fallible step.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct WagerIntent {
    pub bettor_id: ParticipantId,
    pub bet_type: BetType,
    pub amount: Chips,
}

/// Stateless decision function for bot wagers.
#[derive(Clone, Copy, Debug, Default)]
pub struct BotWagerPolicy;

impl BotWagerPolicy {
    /// Decide whether, what, and how much `bot` wagers this window.
    ///
    /// Returns `None` when the bot sits out: the aggressiveness draw came up
    /// short, or none of its preferred bets are valid for the phase.
    ///
    /// The bet probability is `aggressiveness / 10`, scaled by
    /// [`COME_OUT_EAGERNESS`] during come-out and [`MID_SERIES_CAUTION`]
    /// otherwise, clamped to `[0, 1]`. The amount is
    /// `base_bet * (1 + r * risk_tolerance / 10)` for `r` drawn uniformly in
    /// `[0, 1)`, clamped into the table limits and the bot's own maximum.
    pub fn decide<R: Rng>(
        rng: &mut R,
        bot: &BotProfile,
        phase: Phase,
        point: Option<Point>,
        limits: &TableLimits,
    ) -> Option<WagerIntent> {
        let scale = if phase == Phase::ComeOut {
            COME_OUT_EAGERNESS
        } else {
            MID_SERIES_CAUTION
        };
        let p = (f64::from(bot.personality.aggressiveness) / f64::from(PERSONALITY_MAX) * scale)
            .clamp(0.0, 1.0);
        if !rng.random_bool(p) {
            trace!("{} sits out ({phase}, point {point:?})", bot.id);
            return None;
        }

        let bet_type = bot
            .strategy
            .preferred_bets
            .iter()
            .copied()
            .find(|bet_type| BetCatalog::valid_in_phase(*bet_type, phase))?;

        let spread = rng.random::<f64>() * f64::from(bot.personality.risk_tolerance)
            / f64::from(PERSONALITY_MAX);
        let sized = (bot.strategy.base_bet as f64 * (1.0 + spread)) as Chips;
        let ceiling = bot.strategy.max_bet.min(limits.max_bet);
        if ceiling < limits.min_bet {
            // The bot's own maximum can't reach the table minimum.
            return None;
        }
        let amount = sized.clamp(limits.min_bet, ceiling);

        trace!("{} intends {bet_type} x{amount}", bot.id);
        Some(WagerIntent {
            bettor_id: bot.id.clone(),
            bet_type,
            amount,
        })
    }
}
