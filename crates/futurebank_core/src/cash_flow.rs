//! Deterministic monthly contributions.
//!
//! The schedule is path-independent, so it is computed once per simulation
//! and shared read-only by every path.

use crate::amortization::{LoanSchedule, total_payment_at};
use crate::error::{Result, SimulationError, Stage};
use crate::model::UserProfile;
use crate::rates::RateModel;

/// Invested savings minus loan payments for a single month
#[must_use]
pub fn net_cashflow(
    profile: &UserProfile,
    rates: &RateModel,
    loans: &[LoanSchedule],
    month: usize,
) -> f64 {
    rates.effective_net_income(month) * profile.savings_rate - total_payment_at(loans, month)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CashFlowSchedule {
    contributions: Vec<f64>,
}

impl CashFlowSchedule {
    /// One entry per horizon month. Fails on the first non-finite value.
    pub fn build(
        profile: &UserProfile,
        rates: &RateModel,
        loans: &[LoanSchedule],
    ) -> Result<Self> {
        let contributions = (0..profile.horizon_months())
            .map(|month| {
                let value = net_cashflow(profile, rates, loans, month);
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(SimulationError::NumericInstability {
                        stage: Stage::CashFlow,
                        path: None,
                        month,
                        value,
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { contributions })
    }

    #[must_use]
    pub fn at(&self, month: usize) -> f64 {
        self.contributions[month]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.contributions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contributions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    /// Undiscounted sum of all contributions
    #[must_use]
    pub fn total(&self) -> f64 {
        self.contributions.iter().sum()
    }
}
