//! Annualized ROI projection for binary prediction markets
//!
//! Buying a contract at price `p` pays $1.00 when it resolves true, so the
//! profit per dollar risked is (1 - p) / p and a loss forfeits the stake.
//! The projector sizes each trade with fractional Kelly for that payoff and
//! hands the bet to the equity simulator.

use crate::error::{ensure_positive_balance, ensure_probability, round_to, BankrollError, Result};
use crate::kelly::{fractional_kelly, BetSpec, DEFAULT_KELLY_FRACTION, DEFAULT_LOSS_MULT};
use crate::simulator::{monte_carlo_equity, validate_counts, SimulationResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Never stake more than this share of equity on one trade
pub const MAX_BET_FRACTION: f64 = 0.15;

/// Smallest stake worth placing when there is any edge
pub const MIN_BET_FRACTION: f64 = 0.005;

/// Trading cadence and simulation size for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Average number of trades per week
    pub trades_per_week: usize,

    /// Fraction of Kelly to bet (0.25 = quarter-Kelly)
    pub kelly_fraction_pct: f64,

    /// Number of weeks to simulate
    pub weeks: usize,

    /// Number of Monte Carlo paths
    pub num_simulations: usize,

    /// Random seed for reproducible projections (None = random)
    pub seed: Option<u64>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            trades_per_week: 10,
            kelly_fraction_pct: DEFAULT_KELLY_FRACTION,
            weeks: 52,
            num_simulations: 2000,
            seed: None,
        }
    }
}

impl ProjectionConfig {
    /// trades_per_week * weeks, rejected if the product overflows
    pub fn total_trades(&self) -> Result<usize> {
        self.trades_per_week.checked_mul(self.weeks).ok_or_else(|| {
            BankrollError::InvalidParameter(format!(
                "trades_per_week ({}) * weeks ({}) overflows",
                self.trades_per_week, self.weeks
            ))
        })
    }
}

/// Simulated outcome plus the sizing that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    #[serde(flatten)]
    pub simulation: SimulationResult,

    /// Bet fraction actually used, as a percentage
    pub kelly_bet_pct: f64,

    /// trades_per_week * weeks
    pub total_trades: usize,

    /// (win_prob - avg_odds) as a percentage
    pub edge_pct: f64,

    /// True when Kelly found no edge and nothing was simulated
    pub no_edge: bool,
}

/// Profit per dollar risked on a contract bought at `avg_odds`
pub fn contract_win_mult(avg_odds: f64) -> Result<f64> {
    if !(avg_odds > 0.0 && avg_odds < 1.0) {
        return Err(BankrollError::InvalidParameter(format!(
            "avg_odds must be between 0 and 1 (the contract price), got {}",
            avg_odds
        )));
    }
    Ok((1.0 - avg_odds) / avg_odds)
}

/// Clamp a fractional Kelly stake to [MIN_BET_FRACTION, MAX_BET_FRACTION]
///
/// Non-positive input passes through (as 0), meaning "do not bet".
pub fn clamp_bet_fraction(kelly: f64) -> f64 {
    let capped = kelly.min(MAX_BET_FRACTION);
    if kelly > 0.0 && capped < MIN_BET_FRACTION {
        MIN_BET_FRACTION
    } else {
        capped.max(0.0)
    }
}

/// Project a year (or `config.weeks`) of trading a binary market
///
/// # Example
///
/// ```
/// use ag_bankroll::{project_yearly_roi, ProjectionConfig};
///
/// let config = ProjectionConfig {
///     num_simulations: 200,
///     seed: Some(42),
///     ..Default::default()
/// };
///
/// let projection = project_yearly_roi(500.0, 0.60, 0.50, &config).unwrap();
/// assert_eq!(projection.total_trades, 520);
/// assert!(projection.simulation.mean_roi > 0.0);
/// ```
pub fn project_yearly_roi(
    initial_balance: f64,
    win_prob: f64,
    avg_odds: f64,
    config: &ProjectionConfig,
) -> Result<YearlyProjection> {
    let win_mult = contract_win_mult(avg_odds)?;
    ensure_positive_balance(initial_balance)?;
    ensure_probability(win_prob)?;

    let total_trades = config.total_trades()?;
    validate_counts(total_trades, config.num_simulations)?;

    let kelly = fractional_kelly(win_prob, win_mult, DEFAULT_LOSS_MULT, config.kelly_fraction_pct)?;
    let bet_fraction = clamp_bet_fraction(kelly);
    let edge_pct = round_to((win_prob - avg_odds) * 100.0, 2);

    debug!(
        win_prob,
        avg_odds,
        kelly,
        bet_fraction,
        total_trades,
        "Projecting yearly ROI"
    );

    if bet_fraction <= 0.0 {
        debug!(win_prob, avg_odds, "No Kelly edge, skipping simulation");
        return Ok(YearlyProjection {
            simulation: no_trade_outcome(initial_balance, config.num_simulations),
            kelly_bet_pct: 0.0,
            total_trades,
            edge_pct,
            no_edge: true,
        });
    }

    let bet = BetSpec::new(win_prob, win_mult, DEFAULT_LOSS_MULT, bet_fraction)?;
    let simulation = monte_carlo_equity(
        initial_balance,
        &bet,
        total_trades,
        config.num_simulations,
        config.seed,
    )?;

    Ok(YearlyProjection {
        simulation,
        kelly_bet_pct: round_to(bet_fraction * 100.0, 2),
        total_trades,
        edge_pct,
        no_edge: false,
    })
}

/// Every path sits out: equity never moves
fn no_trade_outcome(initial_balance: f64, num_simulations: usize) -> SimulationResult {
    SimulationResult::from_finals(initial_balance, vec![initial_balance; num_simulations])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn seeded(num_simulations: usize) -> ProjectionConfig {
        ProjectionConfig {
            num_simulations,
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_contract_win_mult() {
        assert_abs_diff_eq!(contract_win_mult(0.5).unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(contract_win_mult(0.25).unwrap(), 3.0, epsilon = 1e-12);
        assert!(contract_win_mult(0.0).is_err());
        assert!(contract_win_mult(1.0).is_err());
    }

    #[test]
    fn test_clamp_bet_fraction() {
        assert_eq!(clamp_bet_fraction(0.5), MAX_BET_FRACTION);
        assert_eq!(clamp_bet_fraction(0.001), MIN_BET_FRACTION);
        assert_eq!(clamp_bet_fraction(0.05), 0.05);
        assert_eq!(clamp_bet_fraction(0.0), 0.0);
        assert_eq!(clamp_bet_fraction(-0.2), 0.0);
    }

    #[test]
    fn test_yearly_roi_positive_edge() {
        let result = project_yearly_roi(500.0, 0.60, 0.50, &seeded(500)).unwrap();

        assert!(result.simulation.mean_roi > 0.0);
        assert_eq!(result.total_trades, 520);
        assert_abs_diff_eq!(result.edge_pct, 10.0, epsilon = 1e-9);
        // Full Kelly 0.2, quarter 0.05
        assert_abs_diff_eq!(result.kelly_bet_pct, 5.0, epsilon = 1e-9);
        assert!(!result.no_edge);
    }

    #[test]
    fn test_yearly_roi_reaches_target() {
        let config = ProjectionConfig {
            trades_per_week: 12,
            ..seeded(1000)
        };
        let result = project_yearly_roi(500.0, 0.65, 0.50, &config).unwrap();
        assert!(
            result.simulation.median_final > 1000.0,
            "median final {} below $1000",
            result.simulation.median_final
        );
    }

    #[test]
    fn test_bet_fraction_capped() {
        // Full Kelly here is 0.8; quarter is 0.2, above the cap
        let result = project_yearly_roi(500.0, 0.90, 0.50, &seeded(50)).unwrap();
        assert_abs_diff_eq!(result.kelly_bet_pct, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bet_fraction_floored() {
        // Full Kelly 0.02, a tenth of it is 0.002: raised to 0.005
        let config = ProjectionConfig {
            kelly_fraction_pct: 0.1,
            ..seeded(50)
        };
        let result = project_yearly_roi(500.0, 0.51, 0.50, &config).unwrap();
        assert_abs_diff_eq!(result.kelly_bet_pct, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_no_edge_returns_flat_projection() {
        let result = project_yearly_roi(500.0, 0.40, 0.50, &seeded(100)).unwrap();

        assert!(result.no_edge);
        assert_eq!(result.kelly_bet_pct, 0.0);
        assert_eq!(result.total_trades, 520);
        assert_abs_diff_eq!(result.edge_pct, -10.0, epsilon = 1e-9);
        assert_eq!(result.simulation.mean_final, 500.0);
        assert_eq!(result.simulation.median_roi, 0.0);
        assert_eq!(result.simulation.ruin_probability, 0.0);
        assert_eq!(result.simulation.paths_positive, 0.0);
    }

    #[test]
    fn test_yearly_roi_invalid_odds() {
        let config = ProjectionConfig::default();
        assert!(project_yearly_roi(500.0, 0.6, 0.0, &config).is_err());
        assert!(project_yearly_roi(500.0, 0.6, 1.0, &config).is_err());
    }

    #[test]
    fn test_yearly_roi_invalid_inputs() {
        assert!(project_yearly_roi(0.0, 0.6, 0.5, &seeded(10)).is_err());
        assert!(project_yearly_roi(500.0, 1.0, 0.5, &seeded(10)).is_err());

        let no_weeks = ProjectionConfig { weeks: 0, ..seeded(10) };
        assert!(project_yearly_roi(500.0, 0.6, 0.5, &no_weeks).is_err());

        let bad_fraction = ProjectionConfig {
            kelly_fraction_pct: 1.5,
            ..seeded(10)
        };
        assert!(matches!(
            project_yearly_roi(500.0, 0.6, 0.5, &bad_fraction),
            Err(BankrollError::InvalidFraction { .. })
        ));
    }

    #[test]
    fn test_total_trades_overflow_rejected() {
        let config = ProjectionConfig {
            trades_per_week: usize::MAX / 2,
            weeks: 3,
            ..seeded(10)
        };
        assert!(matches!(
            config.total_trades(),
            Err(BankrollError::InvalidParameter(_))
        ));
        assert!(matches!(
            project_yearly_roi(500.0, 0.6, 0.5, &config),
            Err(BankrollError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_total_trades_product() {
        assert_eq!(ProjectionConfig::default().total_trades().unwrap(), 520);
    }

    #[test]
    fn test_projection_is_reproducible() {
        let a = project_yearly_roi(500.0, 0.58, 0.50, &seeded(200)).unwrap();
        let b = project_yearly_roi(500.0, 0.58, 0.50, &seeded(200)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_projection_serializes_flat() {
        let result = project_yearly_roi(500.0, 0.60, 0.50, &seeded(20)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("median_final").is_some());
        assert!(json.get("kelly_bet_pct").is_some());
        assert!(json.get("simulation").is_none());
    }
}
