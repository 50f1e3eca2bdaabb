//! Simulation configuration
//!
//! `SimulationConfig` holds the Monte Carlo settings. A `Scenario` bundles it
//! with the household profile and portfolio so a complete run can be stored
//! in, and loaded from, a single file.
//!
//! # Builder DSL
//!
//! ```ignore
//! use futurebank_core::config::ProfileBuilder;
//!
//! let profile = ProfileBuilder::new()
//!     .horizon_years(10)
//!     .income(40_000.0)
//!     .expenses(20_000.0)
//!     .savings_rate(0.35)
//!     .goal("Car", 2, 700_000.0)
//!     .loan("EduLoan", 500_000.0, 0.12, 5)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::model::{PortfolioConfig, SimulationResult, UserProfile};

pub mod builder;
pub mod presets;

pub use builder::ProfileBuilder;

/// Upper bound on `n_paths`; the wealth matrix grows linearly with it
pub const MAX_PATHS: usize = 1_000_000;

/// Monte Carlo settings shared read-only by every path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub n_paths: usize,
    /// Base seed; every path's stream is derived from it
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_paths: 10_000,
            seed: 42,
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn new(n_paths: usize, seed: u64) -> Self {
        Self { n_paths, seed }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.n_paths == 0 {
            return Err(ConfigError::ZeroPaths);
        }
        if self.n_paths > MAX_PATHS {
            return Err(ConfigError::TooManyPaths {
                requested: self.n_paths,
                max: MAX_PATHS,
            });
        }
        Ok(())
    }
}

/// A complete, self-contained simulation input
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub profile: UserProfile,
    pub portfolio: PortfolioConfig,
    pub simulation: SimulationConfig,
}

impl Scenario {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.profile.validate()?;
        self.portfolio.validate()?;
        self.simulation.validate()
    }

    pub fn simulate(&self) -> Result<SimulationResult> {
        crate::simulation::simulate(&self.profile, &self.portfolio, &self.simulation)
    }

    #[must_use]
    pub fn with_paths(mut self, n_paths: usize) -> Self {
        self.simulation.n_paths = n_paths;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulation.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_paths_rejected() {
        assert_eq!(
            SimulationConfig::new(0, 1).validate(),
            Err(ConfigError::ZeroPaths)
        );
    }

    #[test]
    fn test_path_cap() {
        assert!(SimulationConfig::new(MAX_PATHS, 1).validate().is_ok());
        assert!(matches!(
            SimulationConfig::new(MAX_PATHS + 1, 1).validate(),
            Err(ConfigError::TooManyPaths { .. })
        ));
    }

    #[test]
    fn test_partial_scenario_uses_defaults() {
        let json = r#"{ "profile": { "horizon_years": 3 }, "simulation": { "seed": 7 } }"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.profile.horizon_years, 3);
        assert_eq!(scenario.profile.monthly_income, 40_000.0);
        assert_eq!(scenario.portfolio, PortfolioConfig::default());
        assert_eq!(scenario.simulation, SimulationConfig::new(10_000, 7));
    }
}
