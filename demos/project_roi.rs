//! Yearly ROI projection example
//!
//! Sizes a Polymarket-style strategy with quarter-Kelly, projects a year of
//! trading and reports the tail risk of the simulated outcomes.
//!
//! Run with: cargo run --example project_roi [profile.yaml]

use ag_bankroll::*;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Yearly ROI Projection Example ===\n");

    let default_profile = concat!(env!("CARGO_MANIFEST_DIR"), "/profiles/quarter_kelly.yaml");
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| default_profile.to_string());
    let profile = StrategyProfile::from_file(&path)?;

    println!("Profile: {}", profile.name);
    println!("Bankroll: ${:.2}", profile.initial_balance);
    println!("Win probability: {:.2}%", profile.win_prob * 100.0);
    println!("Contract price: ${:.2}", profile.avg_odds);
    println!();

    // 1. Kelly sizing for the contract payoff
    let win_mult = contract_win_mult(profile.avg_odds)?;
    let full = kelly_fraction(profile.win_prob, win_mult, DEFAULT_LOSS_MULT)?;
    let half = half_kelly(profile.win_prob, win_mult, DEFAULT_LOSS_MULT)?;
    println!("--- Kelly Sizing ---");
    println!("Full Kelly: {:.2}%", full * 100.0);
    println!("Half Kelly: {:.2}%", half * 100.0);
    println!();

    // 2. Projection
    let projection = profile.project()?;
    let sim = &projection.simulation;
    println!("--- Projection ({} trades) ---", projection.total_trades);
    println!("Bet size: {:.2}% of equity", projection.kelly_bet_pct);
    println!("Edge: {:.2} points", projection.edge_pct);
    println!("Median final: ${:.2}", sim.median_final);
    println!("Mean final: ${:.2}", sim.mean_final);
    println!("5th / 95th percentile: ${:.2} / ${:.2}", sim.p5_final, sim.p95_final);
    println!("Ruin probability: {:.2}%", sim.ruin_probability * 100.0);
    println!("Paths ending positive: {:.2}%", sim.paths_positive * 100.0);
    println!();

    if projection.no_edge {
        println!("No edge at this price: nothing to size.");
        return Ok(());
    }

    // 3. Tail risk of 52-trade returns
    let bet = BetSpec::new(
        profile.win_prob,
        win_mult,
        DEFAULT_LOSS_MULT,
        projection.kelly_bet_pct / 100.0,
    )?;
    let returns: Vec<f64> = (0..200u64)
        .map(|seed| {
            monte_carlo_equity(profile.initial_balance, &bet, 52, 1, Some(seed)).map(|r| r.mean_roi)
        })
        .collect::<Result<_>>()?;

    let var = RiskMeasure::historical(&returns, 0.95)?;
    let cvar = RiskMeasure::conditional(&returns, 0.95)?;
    println!("--- Tail Risk (52 trades) ---");
    println!("Historical VaR 95%: ${:.2}", var.in_dollars(profile.initial_balance));
    println!("CVaR 95%: ${:.2}", cvar.in_dollars(profile.initial_balance));

    Ok(())
}
