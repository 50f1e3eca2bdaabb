use serde::{Deserialize, Serialize};

use super::check_finite;
use crate::error::ConfigError;

/// Annual return assumptions for the single risky portfolio shared by all paths
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Annual expected return, may be negative
    pub expected_return: f64,
    /// Annual standard deviation of returns
    pub volatility: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            expected_return: 0.12,
            volatility: 0.18,
        }
    }
}

impl PortfolioConfig {
    #[must_use]
    pub fn new(expected_return: f64, volatility: f64) -> Self {
        Self {
            expected_return,
            volatility,
        }
    }

    /// A riskless portfolio growing at `rate` per year
    #[must_use]
    pub fn fixed(rate: f64) -> Self {
        Self::new(rate, 0.0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("expected_return", self.expected_return)?;
        check_finite("volatility", self.volatility)?;
        if self.volatility < 0.0 {
            return Err(ConfigError::NegativeVolatility(self.volatility));
        }
        if self.expected_return <= -1.0 {
            return Err(ConfigError::ReturnBelowTotalLoss(self.expected_return));
        }
        Ok(())
    }
}
