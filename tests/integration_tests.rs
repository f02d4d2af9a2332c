//! Integration tests for the bankroll projection pipeline
//!
//! These tests drive the public API end to end: profile loading, Kelly
//! sizing, simulation, projection and grid search.

use ag_bankroll::{
    conditional_var, find_optimal_strategy, historical_var, kelly_fraction, monte_carlo_equity,
    project_yearly_roi, BankrollError, BetSpec, ProjectionConfig, RiskMeasure, SearchConfig,
    StrategyProfile, MAX_BET_FRACTION,
};
use approx::assert_abs_diff_eq;

fn profile_path(name: &str) -> String {
    format!("{}/profiles/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn test_load_quarter_kelly_profile() {
    let profile = StrategyProfile::from_file(profile_path("quarter_kelly.yaml"))
        .expect("Failed to load quarter-kelly profile");

    assert_eq!(profile.name, "quarter-kelly");
    assert_eq!(profile.projection.seed, Some(42));

    let projection = profile.project().unwrap();
    assert_eq!(projection.total_trades, 520);
    assert_abs_diff_eq!(projection.kelly_bet_pct, 5.0, epsilon = 1e-9);
    assert!(projection.simulation.mean_roi > 0.0);
}

#[test]
fn test_quarter_kelly_profile_search() {
    let profile = StrategyProfile::from_file(profile_path("quarter_kelly.yaml")).unwrap();
    let candidates = profile.search().unwrap();

    assert_eq!(candidates.len(), 3);
    for pair in candidates.windows(2) {
        assert!(pair[0].median_roi >= pair[1].median_roi);
    }
}

#[test]
fn test_aggressive_profile_hits_cap() {
    let profile = StrategyProfile::from_file(profile_path("aggressive.json"))
        .expect("Failed to load aggressive profile");

    // Full Kelly at 65% on even money is 0.30, capped at 15%
    let projection = profile.project().unwrap();
    assert_abs_diff_eq!(projection.kelly_bet_pct, MAX_BET_FRACTION * 100.0, epsilon = 1e-9);
    assert_eq!(projection.total_trades, 520);
}

#[test]
fn test_kelly_sized_simulation_workflow() {
    let full = kelly_fraction(0.6, 1.0, 1.0).unwrap();
    let bet = BetSpec::new(0.6, 1.0, 1.0, full / 4.0).unwrap();

    let result = monte_carlo_equity(1000.0, &bet, 200, 500, Some(42)).unwrap();
    assert!(result.mean_final > 1000.0);
    assert!(result.paths_positive > 0.5);
    assert!((0.0..=1.0).contains(&result.ruin_probability));
}

#[test]
fn test_simulated_returns_feed_risk_measures() {
    // Ten-trade returns of independent single-path runs
    let bet = BetSpec::new(0.55, 1.0, 1.0, 0.05).unwrap();
    let returns: Vec<f64> = (0..40u64)
        .map(|seed| {
            let r = monte_carlo_equity(1000.0, &bet, 10, 1, Some(seed)).unwrap();
            r.mean_roi
        })
        .collect();

    let var = historical_var(&returns, 0.95).unwrap();
    let cvar = conditional_var(&returns, 0.95).unwrap();
    assert!(cvar >= var);

    let measure = RiskMeasure::historical(&returns, 0.95).unwrap();
    assert_eq!(measure.value, var);
}

#[test]
fn test_projection_total_trades() {
    let config = ProjectionConfig {
        trades_per_week: 10,
        weeks: 52,
        num_simulations: 100,
        seed: Some(42),
        ..Default::default()
    };
    let result = project_yearly_roi(500.0, 0.6, 0.5, &config).unwrap();
    assert_eq!(result.total_trades, 520);
}

#[test]
fn test_projection_errors_surface_unchanged() {
    let config = ProjectionConfig::default();
    let err = project_yearly_roi(500.0, 0.6, 1.0, &config).unwrap_err();
    assert!(matches!(err, BankrollError::InvalidParameter(_)));
    assert!(err.is_domain());
}

#[test]
fn test_search_results_serialize() {
    let config = SearchConfig {
        win_prob_range: (0.60, 0.65),
        odds_range: (0.45, 0.50),
        ..Default::default()
    };
    let candidates = find_optimal_strategy(&config).unwrap();
    assert!(!candidates.is_empty());

    let json = serde_json::to_string(&candidates).unwrap();
    assert!(json.contains("meets_target"));
    assert!(json.contains("dollar_roi"));
}
