//! Brute-force strategy search over (win probability, market price)
//!
//! Every grid point with an edge is projected over a year of trading and
//! ranked by median ROI. Points the projector rejects are dropped from the
//! results without aborting the sweep.

use crate::error::{ensure_positive_balance, round_to, BankrollError, Result};
use crate::projection::{project_yearly_roi, ProjectionConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Tolerance for floating-point grid boundaries
const GRID_EPSILON: f64 = 1e-9;

/// Grid bounds and target for a strategy search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Starting bankroll
    pub initial_balance: f64,

    /// Dollar profit a strategy must reach to meet the target
    pub target_roi_dollars: f64,

    /// Inclusive (low, high) win probabilities to sweep
    pub win_prob_range: (f64, f64),

    /// Inclusive (low, high) contract prices to sweep
    pub odds_range: (f64, f64),

    /// Grid spacing on both axes
    pub step: f64,

    /// Seed shared by every grid point
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            initial_balance: 500.0,
            target_roi_dollars: 1000.0,
            win_prob_range: (0.55, 0.70),
            odds_range: (0.45, 0.60),
            step: 0.05,
            seed: 42,
        }
    }
}

impl SearchConfig {
    /// Projection parameters applied at every grid point
    pub fn point_projection(&self) -> ProjectionConfig {
        ProjectionConfig {
            trades_per_week: 10,
            kelly_fraction_pct: 0.25,
            weeks: 52,
            num_simulations: 500,
            seed: Some(self.seed),
        }
    }
}

/// One evaluated grid point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyCandidate {
    pub win_prob: f64,
    pub avg_odds: f64,
    pub edge_pct: f64,
    pub kelly_bet_pct: f64,
    pub median_final: f64,
    pub mean_final: f64,

    /// median_final - initial_balance
    pub dollar_roi: f64,

    pub median_roi: f64,
    pub ruin_probability: f64,

    /// dollar_roi >= target_roi_dollars
    pub meets_target: bool,
}

/// Inclusive grid from `low` to `high`, spaced by `step`
fn grid_axis(low: f64, high: f64, step: f64) -> impl Iterator<Item = f64> {
    (0usize..)
        .map(move |i| low + i as f64 * step)
        .take_while(move |&value| value <= high + GRID_EPSILON)
}

/// Sweep the grid and rank candidates by median ROI, best first
///
/// Ties keep sweep order (win probability outer, price inner, both
/// ascending).
pub fn find_optimal_strategy(config: &SearchConfig) -> Result<Vec<StrategyCandidate>> {
    ensure_positive_balance(config.initial_balance)?;

    if !(config.step > 0.0 && config.step.is_finite()) {
        return Err(BankrollError::InvalidParameter(format!(
            "grid step must be positive, got {}",
            config.step
        )));
    }

    let bounds = [
        config.win_prob_range.0,
        config.win_prob_range.1,
        config.odds_range.0,
        config.odds_range.1,
        config.target_roi_dollars,
    ];
    if bounds.iter().any(|b| !b.is_finite()) {
        return Err(BankrollError::NotANumber { name: "search bounds" });
    }

    let projection = config.point_projection();
    let mut candidates = Vec::new();
    let mut skipped = 0usize;

    let (wp_low, wp_high) = config.win_prob_range;
    let (odds_low, odds_high) = config.odds_range;

    for win_prob in grid_axis(wp_low, wp_high, config.step) {
        for avg_odds in grid_axis(odds_low, odds_high, config.step) {
            // No edge possible
            if win_prob <= avg_odds + GRID_EPSILON {
                continue;
            }

            trace!(win_prob, avg_odds, "Evaluating grid point");

            let projected =
                match project_yearly_roi(config.initial_balance, win_prob, avg_odds, &projection) {
                    Ok(projected) => projected,
                    Err(err) if err.is_domain() => {
                        debug!(win_prob, avg_odds, error = %err, "Skipping grid point");
                        skipped += 1;
                        continue;
                    }
                    Err(err) => return Err(err),
                };

            let sim = &projected.simulation;
            let dollar_roi = sim.median_final - config.initial_balance;

            candidates.push(StrategyCandidate {
                win_prob: round_to(win_prob, 2),
                avg_odds: round_to(avg_odds, 2),
                edge_pct: projected.edge_pct,
                kelly_bet_pct: projected.kelly_bet_pct,
                median_final: sim.median_final,
                mean_final: sim.mean_final,
                dollar_roi: round_to(dollar_roi, 2),
                median_roi: sim.median_roi,
                ruin_probability: sim.ruin_probability,
                meets_target: dollar_roi >= config.target_roi_dollars,
            });
        }
    }

    rank_candidates(&mut candidates);

    info!(
        evaluated = candidates.len(),
        skipped,
        meeting_target = candidates.iter().filter(|c| c.meets_target).count(),
        "Strategy search complete"
    );

    Ok(candidates)
}

/// Best median ROI first; equal median ROI keeps sweep order
fn rank_candidates(candidates: &mut [StrategyCandidate]) {
    candidates.sort_by(|a, b| b.median_roi.total_cmp(&a.median_roi));
}
