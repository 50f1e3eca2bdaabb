mod portfolio;
mod profile;
mod results;

pub use portfolio::PortfolioConfig;
pub use profile::{Goal, Loan, UserProfile};
pub use results::{GoalSuccessRates, PercentileBand, SimulationResult, YearlyRow};

use crate::error::ConfigError;

pub const MONTHS_PER_YEAR: usize = 12;

/// Longest projection accepted; with `MAX_PATHS` this bounds the wealth matrix
pub const MAX_HORIZON_YEARS: u32 = 150;

pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::NegativeAmount { field, value });
    }
    Ok(value)
}

pub(crate) fn check_fraction(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    check_finite(field, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::FractionOutOfRange { field, value });
    }
    Ok(value)
}
