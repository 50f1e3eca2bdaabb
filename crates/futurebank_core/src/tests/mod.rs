//! Integration tests for the futurebank projection engine
//!
//! Tests are organized by topic:
//! - `basic` - Result shape, deterministic scenarios and input rejection
//! - `loans` - Loan payments flowing into contributions and wealth
//! - `goals` - Goal success probabilities
//! - `determinism` - Seeding, path independence, execution modes, cancellation
//! - `properties` - Randomized invariants over generated profiles

mod loans;

use crate::config::{ProfileBuilder, SimulationConfig};
use crate::model::{PercentileBand, PortfolioConfig, SimulationResult, UserProfile};

/// Ten thousand a month, 70% invested, nothing else
fn salary_only_profile(years: u32) -> UserProfile {
    ProfileBuilder::blank()
        .horizon_years(years)
        .income(10_000.0)
        .savings_rate(0.7)
        .build()
        .unwrap()
}

fn small_run(n_paths: usize) -> SimulationConfig {
    SimulationConfig::new(n_paths, 42)
}

fn assert_bands_ordered(result: &SimulationResult) {
    for month in 0..result.horizon_months() {
        let values: Vec<f64> = PercentileBand::ALL
            .iter()
            .map(|band| result.band(*band)[month])
            .collect();
        for pair in values.windows(2) {
            assert!(
                pair[0] <= pair[1],
                "bands out of order at month {month}: {values:?}"
            );
        }
    }
}

fn fixed_portfolio(annual: f64) -> PortfolioConfig {
    PortfolioConfig::fixed(annual)
}
