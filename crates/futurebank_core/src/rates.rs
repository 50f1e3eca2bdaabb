//! Annual-to-monthly rate conversion.
//!
//! Returns are stochastic and drive compounding; inflation and tax are
//! deterministic and apply to cash flows only.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::ConfigError;
use crate::model::{MONTHS_PER_YEAR, PortfolioConfig, UserProfile};

/// Convert a yearly rate to an n-month rate using compound interest
#[must_use]
#[inline]
pub fn n_month_rate(yearly_rate: f64, n_months: f64) -> f64 {
    (1.0 + yearly_rate).powf(n_months / MONTHS_PER_YEAR as f64) - 1.0
}

#[derive(Debug, Clone)]
pub struct RateModel {
    monthly_mean: f64,
    monthly_std: f64,
    returns: Normal<f64>,
    annual_inflation: f64,
    tax_rate: f64,
    monthly_surplus: f64,
}

impl RateModel {
    pub fn new(portfolio: &PortfolioConfig, profile: &UserProfile) -> Result<Self, ConfigError> {
        portfolio.validate()?;

        let monthly_mean = n_month_rate(portfolio.expected_return, 1.0);
        let monthly_std = portfolio.volatility / (MONTHS_PER_YEAR as f64).sqrt();
        if !monthly_mean.is_finite() {
            return Err(ConfigError::ReturnBelowTotalLoss(portfolio.expected_return));
        }
        let returns = Normal::new(monthly_mean, monthly_std)
            .map_err(|_| ConfigError::NegativeVolatility(portfolio.volatility))?;

        Ok(Self {
            monthly_mean,
            monthly_std,
            returns,
            annual_inflation: profile.inflation,
            tax_rate: profile.tax_rate,
            monthly_surplus: profile.monthly_surplus(),
        })
    }

    #[must_use]
    pub fn monthly_mean(&self) -> f64 {
        self.monthly_mean
    }

    #[must_use]
    pub fn monthly_std(&self) -> f64 {
        self.monthly_std
    }

    /// Distribution of one month's portfolio return
    #[must_use]
    pub fn returns(&self) -> &Normal<f64> {
        &self.returns
    }

    pub fn sample_return<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.returns.sample(rng)
    }

    /// Price level one month after another: `(1 + inflation)^(1/12)`
    #[must_use]
    pub fn monthly_inflation_factor(&self) -> f64 {
        1.0 + n_month_rate(self.annual_inflation, 1.0)
    }

    /// Cumulative price level at `month`, 1.0 at month 0
    #[must_use]
    pub fn inflation_factor(&self, month: usize) -> f64 {
        (1.0 + self.annual_inflation).powf(month as f64 / MONTHS_PER_YEAR as f64)
    }

    /// Income minus expenses at `month`, inflated and after flat tax
    #[must_use]
    pub fn effective_net_income(&self, month: usize) -> f64 {
        self.monthly_surplus * self.inflation_factor(month) * (1.0 - self.tax_rate)
    }
}
