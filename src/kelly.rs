//! Kelly criterion sizing for binary outcomes
//!
//! f* = (p * b - q) / b
//!
//! where p is the win probability, q = 1 - p, and b = win_mult / loss_mult
//! is the net odds per unit risked. A negative f* means there is no edge.

use crate::error::{
    ensure_finite, ensure_positive_multiplier, ensure_probability, ensure_unit_fraction, Result,
};
use serde::{Deserialize, Serialize};

/// Stake lost on a losing trade when the caller does not say otherwise
pub const DEFAULT_LOSS_MULT: f64 = 1.0;

/// Quarter-Kelly
pub const DEFAULT_KELLY_FRACTION: f64 = 0.25;

/// Full Kelly fraction for a binary bet
///
/// The result is not floored: a negative value signals a losing proposition
/// and the caller decides what to do with it.
///
/// # Example
///
/// ```
/// use ag_bankroll::kelly_fraction;
///
/// let f = kelly_fraction(0.6, 1.0, 1.0).unwrap();
/// assert!((f - 0.2).abs() < 1e-12);
/// ```
pub fn kelly_fraction(win_prob: f64, win_mult: f64, loss_mult: f64) -> Result<f64> {
    ensure_probability(win_prob)?;
    ensure_positive_multiplier("win_mult", win_mult)?;
    ensure_positive_multiplier("loss_mult", loss_mult)?;

    let b = win_mult / loss_mult;
    ensure_positive_multiplier("win_mult / loss_mult", b)?;

    let q = 1.0 - win_prob;
    Ok((win_prob * b - q) / b)
}

/// Half of full Kelly, floored at zero
pub fn half_kelly(win_prob: f64, win_mult: f64, loss_mult: f64) -> Result<f64> {
    let f = kelly_fraction(win_prob, win_mult, loss_mult)?;
    Ok((f / 2.0).max(0.0))
}

/// Full Kelly scaled by `fraction` in (0, 1], floored at zero
pub fn fractional_kelly(win_prob: f64, win_mult: f64, loss_mult: f64, fraction: f64) -> Result<f64> {
    ensure_unit_fraction("fraction", fraction)?;
    let f = kelly_fraction(win_prob, win_mult, loss_mult)?;
    Ok((f * fraction).max(0.0))
}

/// One repeatable wager
///
/// Construction validates every field, so a `BetSpec` in hand is always
/// safe to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BetSpec {
    win_prob: f64,
    win_mult: f64,
    loss_mult: f64,
    bet_fraction: f64,
}

impl BetSpec {
    /// Create a validated bet
    ///
    /// * `win_prob` - probability of a win, in (0, 1)
    /// * `win_mult` - profit per unit staked on a win
    /// * `loss_mult` - fraction of the stake lost on a loss
    /// * `bet_fraction` - share of current equity staked per trade, in (0, 1]
    pub fn new(win_prob: f64, win_mult: f64, loss_mult: f64, bet_fraction: f64) -> Result<Self> {
        ensure_probability(win_prob)?;
        ensure_positive_multiplier("win_mult", win_mult)?;
        ensure_positive_multiplier("loss_mult", loss_mult)?;
        ensure_finite("bet_fraction", bet_fraction)?;
        ensure_unit_fraction("bet_fraction", bet_fraction)?;

        Ok(Self {
            win_prob,
            win_mult,
            loss_mult,
            bet_fraction,
        })
    }

    /// Bet sized at a fraction of Kelly for the given odds
    pub fn kelly_sized(win_prob: f64, win_mult: f64, loss_mult: f64, fraction: f64) -> Result<Self> {
        let bet_fraction = fractional_kelly(win_prob, win_mult, loss_mult, fraction)?;
        Self::new(win_prob, win_mult, loss_mult, bet_fraction)
    }

    pub fn win_prob(&self) -> f64 {
        self.win_prob
    }

    pub fn win_mult(&self) -> f64 {
        self.win_mult
    }

    pub fn loss_mult(&self) -> f64 {
        self.loss_mult
    }

    pub fn bet_fraction(&self) -> f64 {
        self.bet_fraction
    }

    /// Expected growth of equity per trade (arithmetic)
    pub fn expected_return(&self) -> f64 {
        self.bet_fraction
            * (self.win_prob * self.win_mult - (1.0 - self.win_prob) * self.loss_mult)
    }
}
