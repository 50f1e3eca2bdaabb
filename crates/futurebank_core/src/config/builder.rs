//! Profile Builder
//!
//! Fluent construction of a [`UserProfile`], validated on `build()`.
//!
//! # Example
//!
//! ```ignore
//! let profile = ProfileBuilder::new()
//!     .start_age(30)
//!     .horizon_years(20)
//!     .income(9_000.0)
//!     .expenses(5_500.0)
//!     .savings_rate(0.6)
//!     .inflation(0.03)
//!     .goal("House", 7, 120_000.0)
//!     .build()?;
//! ```

use crate::error::ConfigError;
use crate::model::{Goal, Loan, UserProfile};

/// Builder for [`UserProfile`]; unset fields keep [`UserProfile::default`] values
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    profile: UserProfile,
}

impl ProfileBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an empty cash-flow model: no income, expenses, inflation or tax
    #[must_use]
    pub fn blank() -> Self {
        Self {
            profile: UserProfile {
                monthly_income: 0.0,
                monthly_expenses: 0.0,
                savings_rate: 0.0,
                inflation: 0.0,
                tax_rate: 0.0,
                ..Default::default()
            },
        }
    }

    #[must_use]
    pub fn start_age(mut self, age: u32) -> Self {
        self.profile.start_age = age;
        self
    }

    #[must_use]
    pub fn horizon_years(mut self, years: u32) -> Self {
        self.profile.horizon_years = years;
        self
    }

    #[must_use]
    pub fn income(mut self, monthly: f64) -> Self {
        self.profile.monthly_income = monthly;
        self
    }

    #[must_use]
    pub fn expenses(mut self, monthly: f64) -> Self {
        self.profile.monthly_expenses = monthly;
        self
    }

    #[must_use]
    pub fn savings_rate(mut self, rate: f64) -> Self {
        self.profile.savings_rate = rate;
        self
    }

    #[must_use]
    pub fn inflation(mut self, annual: f64) -> Self {
        self.profile.inflation = annual;
        self
    }

    #[must_use]
    pub fn tax_rate(mut self, rate: f64) -> Self {
        self.profile.tax_rate = rate;
        self
    }

    #[must_use]
    pub fn goal(mut self, name: impl Into<String>, year: u32, amount: f64) -> Self {
        self.profile.goals.push(Goal::new(name, year, amount));
        self
    }

    #[must_use]
    pub fn loan(
        mut self,
        name: impl Into<String>,
        principal: f64,
        annual_rate: f64,
        years: u32,
    ) -> Self {
        self.profile
            .loans
            .push(Loan::new(name, principal, annual_rate, years));
        self
    }

    pub fn build(self) -> Result<UserProfile, ConfigError> {
        self.profile.validate()?;
        Ok(self.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_goal_and_loan_order() {
        let profile = ProfileBuilder::new()
            .goal("B", 3, 10.0)
            .goal("A", 1, 20.0)
            .loan("Second", 100.0, 0.1, 2)
            .loan("First", 200.0, 0.0, 1)
            .build()
            .unwrap();

        let goals: Vec<&str> = profile.goals.iter().map(|g| g.name.as_str()).collect();
        let loans: Vec<&str> = profile.loans.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(goals, ["B", "A"]);
        assert_eq!(loans, ["Second", "First"]);
    }

    #[test]
    fn test_blank_profile_has_no_cash_flow() {
        let profile = ProfileBuilder::blank().build().unwrap();
        assert_eq!(profile.monthly_surplus(), 0.0);
        assert_eq!(profile.inflation, 0.0);
    }

    #[test]
    fn test_build_validates() {
        let err = ProfileBuilder::new().horizon_years(0).build().unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveHorizon);
    }
}
