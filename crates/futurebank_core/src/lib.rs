//! Household net-worth projection library
//!
//! This crate provides a Monte Carlo engine that projects a household's
//! investable wealth month by month over a multi-year horizon. It supports:
//! - Income, expenses and a savings rate with annual inflation and flat tax
//! - Fixed-rate amortizing loans whose payments reduce monthly contributions
//! - Normally distributed monthly portfolio returns
//! - Percentile bands (p5, p25, p50, p75, p95) of wealth for every month
//! - Per-goal success probabilities
//!
//! Runs are reproducible: each path's random stream is derived from the base
//! seed and the path index, so results do not depend on thread scheduling.
//!
//! # Example
//!
//! ```ignore
//! use futurebank_core::{PortfolioConfig, ProfileBuilder, SimulationConfig, simulate};
//!
//! let profile = ProfileBuilder::new()
//!     .horizon_years(10)
//!     .goal("Car", 2, 700_000.0)
//!     .loan("EduLoan", 500_000.0, 0.12, 5)
//!     .build()?;
//!
//! let result = simulate(
//!     &profile,
//!     &PortfolioConfig::new(0.12, 0.18),
//!     &SimulationConfig::new(10_000, 42),
//! )?;
//! println!("{:?}", result.goal_success("Car"));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Engine modules
// ============================================================================

pub mod aggregate;
pub mod amortization;
pub mod cash_flow;
pub mod error;
pub mod path;
pub mod rates;
pub mod rng;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{MAX_PATHS, ProfileBuilder, Scenario, SimulationConfig};
pub use error::{ConfigError, SimulationError, Stage};
pub use model::{
    Goal, GoalSuccessRates, Loan, MAX_HORIZON_YEARS, PercentileBand, PortfolioConfig,
    SimulationResult, UserProfile, YearlyRow,
};
pub use simulation::{
    Execution, SimulationPlan, SimulationProgress, Simulator, simulate, simulate_with_progress,
};
