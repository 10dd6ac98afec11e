//! Bot participant models and roster providers.

use serde::{Deserialize, Serialize};

use crate::game::entities::{BetType, Chips, ParticipantId, Proposition};

/// Personality scale bounds. Both axes run 0 (timid) to 10 (reckless).
pub const PERSONALITY_MAX: u8 = 10;

/// How a bot feels about betting.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Personality {
    /// How often the bot bets at all, 0..=10.
    pub aggressiveness: u8,
    /// How far above its base bet the bot will size up, 0..=10.
    pub risk_tolerance: u8,
}

impl Personality {
    /// Build a personality, clamping both axes into range.
    #[must_use]
    pub fn new(aggressiveness: u8, risk_tolerance: u8) -> Self {
        Self {
            aggressiveness: aggressiveness.min(PERSONALITY_MAX),
            risk_tolerance: risk_tolerance.min(PERSONALITY_MAX),
        }
    }

    /// Rarely bets, never sizes up.
    #[must_use]
    pub fn cautious() -> Self {
        Self::new(3, 1)
    }

    /// Bets about half the time with moderate sizing.
    #[must_use]
    pub fn balanced() -> Self {
        Self::new(5, 5)
    }

    /// Bets nearly every window and chases variance.
    #[must_use]
    pub fn aggressive() -> Self {
        Self::new(9, 8)
    }
}

/// What a bot bets and how much.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Strategy {
    pub base_bet: Chips,
    pub max_bet: Chips,
    /// Bet kinds in preference order; the first one valid for the current
    /// phase is chosen.
    pub preferred_bets: Vec<BetType>,
}

impl Strategy {
    /// Pass-line grinder: small flat bets on the line.
    #[must_use]
    pub fn line_grinder() -> Self {
        Self {
            base_bet: 10,
            max_bet: 50,
            preferred_bets: vec![BetType::PassLine, BetType::Come, BetType::Field],
        }
    }

    /// Contrarian: fades the shooter from the dark side.
    #[must_use]
    pub fn dark_side() -> Self {
        Self {
            base_bet: 15,
            max_bet: 75,
            preferred_bets: vec![BetType::DontPass, BetType::DontCome, BetType::Field],
        }
    }

    /// Thrill seeker: long-odds one-roll props first, field as fallback.
    #[must_use]
    pub fn thrill_seeker() -> Self {
        Self {
            base_bet: 5,
            max_bet: 100,
            preferred_bets: vec![
                BetType::Proposition(Proposition::YoEleven),
                BetType::Proposition(Proposition::AnyCraps),
                BetType::Field,
            ],
        }
    }
}

/// A bot participant: identity plus how it plays.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BotProfile {
    pub id: ParticipantId,
    pub name: String,
    pub personality: Personality,
    pub strategy: Strategy,
}

/// Supplies bot rosters to the table. The core never mutates this data; the
/// trait exists so rosters are injected rather than hardcoded at module
/// scope.
pub trait PersonalityProvider {
    fn roster(&self) -> Vec<BotProfile>;
}

/// A fixed, in-memory roster.
#[derive(Clone, Debug, Default)]
pub struct StaticRoster {
    bots: Vec<BotProfile>,
}

impl StaticRoster {
    #[must_use]
    pub fn new(bots: Vec<BotProfile>) -> Self {
        Self { bots }
    }

    /// A three-seat demo table covering the personality presets.
    #[must_use]
    pub fn house_table() -> Self {
        Self::new(vec![
            BotProfile {
                id: "bot-ruby".to_string(),
                name: "Ruby".to_string(),
                personality: Personality::cautious(),
                strategy: Strategy::line_grinder(),
            },
            BotProfile {
                id: "bot-silas".to_string(),
                name: "Silas".to_string(),
                personality: Personality::balanced(),
                strategy: Strategy::dark_side(),
            },
            BotProfile {
                id: "bot-jinx".to_string(),
                name: "Jinx".to_string(),
                personality: Personality::aggressive(),
                strategy: Strategy::thrill_seeker(),
            },
        ])
    }
}

impl PersonalityProvider for StaticRoster {
    fn roster(&self) -> Vec<BotProfile> {
        self.bots.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personality_clamps_to_scale() {
        let personality = Personality::new(14, 200);
        assert_eq!(personality.aggressiveness, PERSONALITY_MAX);
        assert_eq!(personality.risk_tolerance, PERSONALITY_MAX);
    }

    #[test]
    fn test_presets_are_ordered_by_nerve() {
        assert!(Personality::cautious().aggressiveness < Personality::balanced().aggressiveness);
        assert!(Personality::balanced().aggressiveness < Personality::aggressive().aggressiveness);
    }

    #[test]
    fn test_house_table_roster() {
        let roster = StaticRoster::house_table().roster();
        assert_eq!(roster.len(), 3);
        let ids: Vec<&str> = roster.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["bot-ruby", "bot-silas", "bot-jinx"]);
    }
}
