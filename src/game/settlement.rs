//! Wager resolution against a roll.
//!
//! Resolution is a pure function of `(wager, roll, phase before the roll,
//! point before the roll)`. No randomness is permitted here; come and
//! don't-come wagers track their own point like a private pass-line series
//! rather than being coin-flipped.

use log::debug;
use serde::{Deserialize, Serialize};

use super::catalog::BetCatalog;
use super::entities::{BetType, Chips, DiceRoll, Phase, Point, Proposition, Wager, WagerId};

/// What a roll decided for a single wager.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Wager won; `payout` is winnings on top of the returned stake.
    Won { payout: Chips },
    /// Wager lost; the stake is forfeited to the pool.
    Lost,
    /// Bar-the-12 push; the stake comes back untouched.
    Pushed,
    /// A come/don't-come wager had its own point established.
    ComePoint(Point),
    /// The roll did not determine this wager's fate.
    StillOpen,
}

/// Judge one open wager against a roll.
///
/// `phase` and `point` are the table state *before* the roll was applied to
/// the state machine, which is the state the wager was live under.
#[must_use]
pub fn resolve(wager: &Wager, roll: DiceRoll, phase: Phase, point: Option<Point>) -> Resolution {
    let total = roll.total();
    match wager.bet_type {
        BetType::PassLine => match phase {
            Phase::Point => match point {
                Some(point) if total == point.value() => won(wager, total),
                _ if total == 7 => Resolution::Lost,
                _ => Resolution::StillOpen,
            },
            _ => {
                if roll.is_natural() {
                    won(wager, total)
                } else if roll.is_craps() {
                    Resolution::Lost
                } else {
                    Resolution::StillOpen
                }
            }
        },
        BetType::DontPass => match phase {
            Phase::Point => match point {
                _ if total == 7 => won(wager, total),
                Some(point) if total == point.value() => Resolution::Lost,
                _ => Resolution::StillOpen,
            },
            _ => {
                if roll.is_barred() {
                    Resolution::Pushed
                } else if roll.is_craps() {
                    won(wager, total)
                } else if roll.is_natural() {
                    Resolution::Lost
                } else {
                    Resolution::StillOpen
                }
            }
        },
        // A come wager runs its own come-out/point sub-series: before its
        // point exists the roll is its come-out, afterwards only its point or
        // a 7 decide it.
        BetType::Come => match wager.come_point {
            Some(come_point) => {
                if total == come_point.value() {
                    won(wager, total)
                } else if total == 7 {
                    Resolution::Lost
                } else {
                    Resolution::StillOpen
                }
            }
            None => {
                if roll.is_natural() {
                    won(wager, total)
                } else if roll.is_craps() {
                    Resolution::Lost
                } else {
                    match Point::try_from(total) {
                        Ok(point) => Resolution::ComePoint(point),
                        Err(_) => Resolution::StillOpen,
                    }
                }
            }
        },
        BetType::DontCome => match wager.come_point {
            Some(come_point) => {
                if total == 7 {
                    won(wager, total)
                } else if total == come_point.value() {
                    Resolution::Lost
                } else {
                    Resolution::StillOpen
                }
            }
            None => {
                if roll.is_barred() {
                    Resolution::Pushed
                } else if roll.is_craps() {
                    won(wager, total)
                } else if roll.is_natural() {
                    Resolution::Lost
                } else {
                    match Point::try_from(total) {
                        Ok(point) => Resolution::ComePoint(point),
                        Err(_) => Resolution::StillOpen,
                    }
                }
            }
        },
        BetType::Field => {
            if matches!(total, 2 | 3 | 4 | 9 | 10 | 11 | 12) {
                won(wager, total)
            } else {
                Resolution::Lost
            }
        }
        BetType::Proposition(prop) => {
            let hit = match prop {
                Proposition::AnySeven => total == 7,
                Proposition::AnyCraps => matches!(total, 2 | 3 | 12),
                Proposition::YoEleven => total == 11,
                Proposition::Aces => total == 2,
                Proposition::Boxcars => total == 12,
            };
            if hit { won(wager, total) } else { Resolution::Lost }
        }
    }
}

fn won(wager: &Wager, total: u8) -> Resolution {
    Resolution::Won {
        payout: BetCatalog::payout_for(wager.bet_type, total).winnings(wager.amount),
    }
}

/// One wager's verdict within a round settlement.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SettledWager {
    pub wager_id: WagerId,
    pub resolution: Resolution,
}

/// The full verdict for one roll: every open wager judged once, plus the
/// pool's net profit (+) or loss (-) from the round.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RoundSettlement {
    pub entries: Vec<SettledWager>,
    pub pool_delta: i64,
}

/// Resolves every open wager in a book against a roll. Stateless; the caller
/// commits the verdicts to the book and escrow as one transaction.
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementEngine;

impl SettlementEngine {
    /// Judge all `wagers` against `roll` under the pre-roll table state.
    ///
    /// The pool delta counts forfeited stakes as profit and paid winnings as
    /// loss; pushes and still-open wagers move nothing.
    #[must_use]
    pub fn settle_round(
        wagers: &[Wager],
        roll: DiceRoll,
        phase: Phase,
        point: Option<Point>,
    ) -> RoundSettlement {
        let mut entries = Vec::with_capacity(wagers.len());
        let mut pool_delta: i64 = 0;
        for wager in wagers.iter().filter(|w| w.is_open()) {
            let resolution = resolve(wager, roll, phase, point);
            match resolution {
                Resolution::Won { payout } => pool_delta -= payout as i64,
                Resolution::Lost => pool_delta += wager.amount as i64,
                Resolution::Pushed | Resolution::ComePoint(_) | Resolution::StillOpen => {}
            }
            entries.push(SettledWager {
                wager_id: wager.id,
                resolution,
            });
        }
        debug!(
            "settled {} wagers on {roll}: pool delta {pool_delta}",
            entries.len()
        );
        RoundSettlement {
            entries,
            pool_delta,
        }
    }
}
