//! # ag-bankroll: Bet Sizing and Bankroll Projection for Binary Markets
//!
//! This library sizes and evaluates repeated bets on binary-outcome markets
//! such as Polymarket YES/NO contracts.
//!
//! ## Core Components
//!
//! - **Kelly sizing**: full, half and fractional Kelly bet fractions
//! - **Risk measures**: parametric, historical and conditional VaR
//! - **Equity simulator**: seeded Monte Carlo paths with an absorbing ruin state
//! - **Yearly projection**: Kelly-sized simulation from a contract price and cadence
//! - **Strategy search**: grid sweep over win probability and contract price
//!
//! ## Example Usage
//!
//! ```rust
//! use ag_bankroll::{find_optimal_strategy, SearchConfig};
//!
//! let config = SearchConfig {
//!     win_prob_range: (0.60, 0.65),
//!     odds_range: (0.45, 0.50),
//!     ..Default::default()
//! };
//!
//! let candidates = find_optimal_strategy(&config).unwrap();
//! for pair in candidates.windows(2) {
//!     assert!(pair[0].median_roi >= pair[1].median_roi);
//! }
//! ```

mod config;
mod error;
mod kelly;
mod projection;
mod search;
mod simulator;
mod sizing;
mod var;

pub use config::StrategyProfile;
pub use error::{BankrollError, Result};
pub use kelly::{
    fractional_kelly, half_kelly, kelly_fraction, BetSpec, DEFAULT_KELLY_FRACTION,
    DEFAULT_LOSS_MULT,
};
pub use projection::{
    clamp_bet_fraction, contract_win_mult, project_yearly_roi, ProjectionConfig,
    YearlyProjection, MAX_BET_FRACTION, MIN_BET_FRACTION,
};
pub use search::{find_optimal_strategy, SearchConfig, StrategyCandidate};
pub use simulator::{
    monte_carlo_equity, simulate, EquityPath, PathState, SimulationResult,
    RUIN_THRESHOLD_FRACTION,
};
pub use sizing::{calculate_position_size, validate_risk_parameters};
pub use var::{
    conditional_var, historical_var, norm_ppf, parametric_var, MeasureKind, RiskMeasure,
};
