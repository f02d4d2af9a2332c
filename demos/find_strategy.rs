//! Strategy search example
//!
//! Sweeps win probability and contract price to find quarter-Kelly
//! strategies that turn $500 into $1000+ of profit within a year.
//!
//! Run with: RUST_LOG=ag_bankroll=debug cargo run --example find_strategy

use ag_bankroll::{find_optimal_strategy, SearchConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Strategy Search Example ===\n");

    let config = SearchConfig::default();
    println!("Bankroll: ${:.2}", config.initial_balance);
    println!("Target profit: ${:.2}", config.target_roi_dollars);
    println!(
        "Win probability: {:.2}..{:.2}, price: {:.2}..{:.2}, step {:.2}",
        config.win_prob_range.0,
        config.win_prob_range.1,
        config.odds_range.0,
        config.odds_range.1,
        config.step
    );
    println!();

    let candidates = find_optimal_strategy(&config)?;

    println!(
        "{:>6} {:>6} {:>7} {:>7} {:>12} {:>10} {:>7} {:>6}",
        "p", "price", "edge%", "bet%", "median", "profit", "ruin%", "target"
    );
    for c in &candidates {
        println!(
            "{:>6.2} {:>6.2} {:>7.2} {:>7.2} {:>12.2} {:>10.2} {:>7.2} {:>6}",
            c.win_prob,
            c.avg_odds,
            c.edge_pct,
            c.kelly_bet_pct,
            c.median_final,
            c.dollar_roi,
            c.ruin_probability * 100.0,
            if c.meets_target { "yes" } else { "no" }
        );
    }

    let hits = candidates.iter().filter(|c| c.meets_target).count();
    println!("\n{} of {} strategies meet the target", hits, candidates.len());

    if let Some(best) = candidates.first() {
        println!("\nBest strategy as JSON:");
        println!("{}", serde_json::to_string_pretty(best)?);
    }

    Ok(())
}
