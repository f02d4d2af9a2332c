//! Monte Carlo equity path simulator
//!
//! This module runs many independent sequences of a repeated binary bet and
//! aggregates the distribution of final equity. Each call owns its own
//! random stream, so a fixed seed reproduces identical paths.

use crate::error::{ensure_positive_balance, round_to, BankrollError, Result};
use crate::kelly::BetSpec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Equity at or below this share of the initial balance counts as ruin
pub const RUIN_THRESHOLD_FRACTION: f64 = 0.01;

/// Lifecycle of a single equity path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathState {
    /// Still trading
    Active,

    /// Equity fell to the ruin threshold; absorbing
    Ruined,
}

/// One simulated bankroll trajectory
///
/// Once the path is `Ruined` no further trades are applied and its equity
/// stays at the value that triggered ruin.
#[derive(Debug, Clone)]
pub struct EquityPath {
    equity: f64,
    ruin_threshold: f64,
    state: PathState,
    trades_applied: usize,
}

impl EquityPath {
    /// Start a path at `initial_balance` with the standard 1% ruin threshold
    pub fn new(initial_balance: f64) -> Self {
        Self::with_ruin_threshold(initial_balance, initial_balance * RUIN_THRESHOLD_FRACTION)
    }

    pub fn with_ruin_threshold(initial_balance: f64, ruin_threshold: f64) -> Self {
        let state = if initial_balance <= ruin_threshold {
            PathState::Ruined
        } else {
            PathState::Active
        };

        Self {
            equity: initial_balance,
            ruin_threshold,
            state,
            trades_applied: 0,
        }
    }

    /// Apply one trade resolved by a uniform `draw` in [0, 1)
    ///
    /// A draw below the win probability is a win. Ruined paths ignore the
    /// draw entirely.
    pub fn step(&mut self, bet: &BetSpec, draw: f64) -> PathState {
        if self.state == PathState::Ruined {
            return self.state;
        }

        let stake = self.equity * bet.bet_fraction();
        if draw < bet.win_prob() {
            self.equity += stake * bet.win_mult();
        } else {
            self.equity -= stake * bet.loss_mult();
        }
        self.trades_applied += 1;

        if self.equity <= self.ruin_threshold {
            self.state = PathState::Ruined;
        }
        self.state
    }

    /// Apply up to `num_trades` trades, drawing from `rng` only while active
    pub fn run<R: Rng + ?Sized>(&mut self, bet: &BetSpec, num_trades: usize, rng: &mut R) -> f64 {
        for _ in 0..num_trades {
            if self.state == PathState::Ruined {
                break;
            }
            let draw: f64 = rng.gen();
            self.step(bet, draw);
        }
        self.equity
    }

    pub fn equity(&self) -> f64 {
        self.equity
    }

    pub fn state(&self) -> PathState {
        self.state
    }

    pub fn is_ruined(&self) -> bool {
        self.state == PathState::Ruined
    }

    /// Number of trades actually applied (stops counting at ruin)
    pub fn trades_applied(&self) -> usize {
        self.trades_applied
    }
}

/// Aggregate statistics over all simulated paths
///
/// Dollar figures are rounded to 2 decimals, ratios to 4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Mean ending equity across all paths
    pub mean_final: f64,

    /// Ending equity at index N/2 of the sorted finals
    pub median_final: f64,

    /// 5th percentile ending equity
    pub p5_final: f64,

    /// 95th percentile ending equity
    pub p95_final: f64,

    /// (mean_final - initial) / initial
    pub mean_roi: f64,

    /// (median_final - initial) / initial
    pub median_roi: f64,

    /// Fraction of paths that ended at or below the ruin threshold
    pub ruin_probability: f64,

    /// Fraction of paths that ended above the initial balance
    pub paths_positive: f64,
}

impl SimulationResult {
    /// Summarize a set of final equities
    ///
    /// `finals` must be non-empty.
    pub(crate) fn from_finals(initial_balance: f64, mut finals: Vec<f64>) -> Self {
        finals.sort_by(f64::total_cmp);

        let n = finals.len();
        let ruin_threshold = initial_balance * RUIN_THRESHOLD_FRACTION;

        let mean_final = finals.iter().sum::<f64>() / n as f64;
        let median_final = finals[n / 2];
        let p5_final = finals[percentile_index(n, 0.05)];
        let p95_final = finals[percentile_index(n, 0.95)];

        let ruin_count = finals.iter().filter(|&&f| f <= ruin_threshold).count();
        let positive_count = finals.iter().filter(|&&f| f > initial_balance).count();

        Self {
            mean_final: round_to(mean_final, 2),
            median_final: round_to(median_final, 2),
            p5_final: round_to(p5_final, 2),
            p95_final: round_to(p95_final, 2),
            mean_roi: round_to((mean_final - initial_balance) / initial_balance, 4),
            median_roi: round_to((median_final - initial_balance) / initial_balance, 4),
            ruin_probability: round_to(ruin_count as f64 / n as f64, 4),
            paths_positive: round_to(positive_count as f64 / n as f64, 4),
        }
    }
}

fn percentile_index(n: usize, quantile: f64) -> usize {
    ((n as f64 * quantile).floor() as usize).min(n - 1)
}

/// Simulate `num_simulations` paths of `num_trades` bets each
///
/// Draws are consumed path by path: every trade of path 0, then path 1,
/// and so on. `seed = None` seeds from OS entropy.
///
/// # Example
///
/// ```
/// use ag_bankroll::{monte_carlo_equity, BetSpec};
///
/// let bet = BetSpec::new(0.6, 1.0, 1.0, 0.05).unwrap();
/// let result = monte_carlo_equity(1000.0, &bet, 200, 500, Some(42)).unwrap();
/// assert!(result.mean_final > 1000.0);
/// ```
pub fn monte_carlo_equity(
    initial_balance: f64,
    bet: &BetSpec,
    num_trades: usize,
    num_simulations: usize,
    seed: Option<u64>,
) -> Result<SimulationResult> {
    ensure_positive_balance(initial_balance)?;
    validate_counts(num_trades, num_simulations)?;

    debug!(
        initial_balance,
        num_trades,
        num_simulations,
        seeded = seed.is_some(),
        "Starting equity simulation"
    );

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut finals = Vec::with_capacity(num_simulations);
    for _ in 0..num_simulations {
        let mut path = EquityPath::new(initial_balance);
        finals.push(path.run(bet, num_trades, &mut rng));
    }

    let result = SimulationResult::from_finals(initial_balance, finals);

    debug!(
        mean_final = result.mean_final,
        median_final = result.median_final,
        ruin_probability = result.ruin_probability,
        "Equity simulation finished"
    );

    Ok(result)
}

/// [`monte_carlo_equity`] taking the bet as raw values
///
/// Every argument is validated before any path is simulated.
#[allow(clippy::too_many_arguments)]
pub fn simulate(
    initial_balance: f64,
    win_prob: f64,
    win_mult: f64,
    loss_mult: f64,
    bet_fraction: f64,
    num_trades: usize,
    num_simulations: usize,
    seed: Option<u64>,
) -> Result<SimulationResult> {
    ensure_positive_balance(initial_balance)?;
    let bet = BetSpec::new(win_prob, win_mult, loss_mult, bet_fraction)?;
    monte_carlo_equity(initial_balance, &bet, num_trades, num_simulations, seed)
}

pub(crate) fn validate_counts(num_trades: usize, num_simulations: usize) -> Result<()> {
    if num_trades < 1 {
        return Err(BankrollError::InvalidParameter(
            "num_trades must be >= 1".to_string(),
        ));
    }

    if num_simulations < 1 {
        return Err(BankrollError::InvalidParameter(
            "num_simulations must be >= 1".to_string(),
        ));
    }

    Ok(())
}
