//! Household inputs: income, spending, savings behaviour, goals and loans.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{MAX_HORIZON_YEARS, MONTHS_PER_YEAR, check_finite, check_fraction, check_non_negative};
use crate::error::ConfigError;

/// A one-off target amount the household wants to afford at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Display label, unique within a profile
    pub name: String,
    /// Years from simulation start; must be below the horizon
    pub year: u32,
    /// Target wealth
    pub amount: f64,
}

impl Goal {
    pub fn new(name: impl Into<String>, year: u32, amount: f64) -> Self {
        Self {
            name: name.into(),
            year,
            amount,
        }
    }

    /// Month index at which wealth is checked against `amount`
    #[must_use]
    pub fn month_index(&self) -> usize {
        self.year as usize * MONTHS_PER_YEAR
    }
}

/// A fixed-rate amortizing loan repaid monthly from the start of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub name: String,
    pub principal: f64,
    pub annual_rate: f64,
    /// Loan term in years. May be longer or shorter than the horizon.
    pub years: u32,
}

impl Loan {
    pub fn new(name: impl Into<String>, principal: f64, annual_rate: f64, years: u32) -> Self {
        Self {
            name: name.into(),
            principal,
            annual_rate,
            years,
        }
    }

    #[must_use]
    pub fn term_months(&self) -> usize {
        self.years as usize * MONTHS_PER_YEAR
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("loan.principal", self.principal)?;
        check_finite("loan.annual_rate", self.annual_rate)?;
        if self.principal <= 0.0 {
            return Err(ConfigError::NonPositiveLoanPrincipal {
                name: self.name.clone(),
                principal: self.principal,
            });
        }
        if self.annual_rate < 0.0 {
            return Err(ConfigError::NegativeLoanRate {
                name: self.name.clone(),
                annual_rate: self.annual_rate,
            });
        }
        if self.years == 0 {
            return Err(ConfigError::NonPositiveLoanTerm {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// Everything about the household that drives its deterministic cash flow
///
/// Missing fields fall back to the defaults below when deserializing, so a
/// scenario file only has to spell out what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub start_age: u32,
    pub horizon_years: u32,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    /// Fraction of net income that is invested each month
    pub savings_rate: f64,
    /// Annual inflation applied to income and expenses
    pub inflation: f64,
    /// Flat tax applied to net income
    pub tax_rate: f64,
    pub goals: Vec<Goal>,
    pub loans: Vec<Loan>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            start_age: 21,
            horizon_years: 10,
            monthly_income: 40_000.0,
            monthly_expenses: 20_000.0,
            savings_rate: 0.35,
            inflation: 0.06,
            tax_rate: 0.05,
            goals: Vec::new(),
            loans: Vec::new(),
        }
    }
}

impl UserProfile {
    #[must_use]
    pub fn horizon_months(&self) -> usize {
        self.horizon_years as usize * MONTHS_PER_YEAR
    }

    /// Age in whole years during month `month`
    #[must_use]
    pub fn age_at_month(&self, month: usize) -> u32 {
        let years = u32::try_from(month / MONTHS_PER_YEAR).unwrap_or(u32::MAX);
        self.start_age.saturating_add(years)
    }

    /// Income minus expenses before inflation and tax
    #[must_use]
    pub fn monthly_surplus(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }

    #[must_use]
    pub fn goal(&self, name: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.name == name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_years == 0 {
            return Err(ConfigError::NonPositiveHorizon);
        }
        if self.horizon_years > MAX_HORIZON_YEARS {
            return Err(ConfigError::HorizonTooLong {
                years: self.horizon_years,
                max: MAX_HORIZON_YEARS,
            });
        }
        check_non_negative("monthly_income", self.monthly_income)?;
        check_non_negative("monthly_expenses", self.monthly_expenses)?;
        check_fraction("savings_rate", self.savings_rate)?;
        check_fraction("tax_rate", self.tax_rate)?;
        if check_finite("inflation", self.inflation)? < 0.0 {
            return Err(ConfigError::NegativeInflation(self.inflation));
        }

        let mut seen = HashSet::with_capacity(self.goals.len());
        for goal in &self.goals {
            check_finite("goal.amount", goal.amount)?;
            if goal.year >= self.horizon_years {
                return Err(ConfigError::GoalOutsideHorizon {
                    name: goal.name.clone(),
                    year: goal.year,
                    horizon_years: self.horizon_years,
                });
            }
            if goal.amount <= 0.0 {
                return Err(ConfigError::NonPositiveGoalAmount {
                    name: goal.name.clone(),
                    amount: goal.amount,
                });
            }
            if !seen.insert(goal.name.as_str()) {
                return Err(ConfigError::DuplicateGoalName(goal.name.clone()));
            }
        }

        for loan in &self.loans {
            loan.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        let profile = UserProfile::default();
        assert!(profile.validate().is_ok());
        assert_eq!(profile.horizon_months(), 120);
    }

    #[test]
    fn test_goal_month_index() {
        assert_eq!(Goal::new("Now", 0, 1.0).month_index(), 0);
        assert_eq!(Goal::new("Car", 2, 700_000.0).month_index(), 24);
    }

    #[test]
    fn test_age_at_month() {
        let profile = UserProfile::default();
        assert_eq!(profile.age_at_month(0), 21);
        assert_eq!(profile.age_at_month(11), 21);
        assert_eq!(profile.age_at_month(12), 22);
        assert_eq!(profile.age_at_month(119), 30);

        let old = UserProfile {
            start_age: u32::MAX - 1,
            ..Default::default()
        };
        assert_eq!(old.age_at_month(24), u32::MAX);
        assert_eq!(profile.age_at_month(usize::MAX), u32::MAX);
    }

    #[test]
    fn test_horizon_cap() {
        let at_cap = UserProfile {
            horizon_years: MAX_HORIZON_YEARS,
            ..Default::default()
        };
        assert!(at_cap.validate().is_ok());

        let beyond = UserProfile {
            horizon_years: MAX_HORIZON_YEARS + 1,
            ..Default::default()
        };
        assert_eq!(
            beyond.validate(),
            Err(ConfigError::HorizonTooLong {
                years: MAX_HORIZON_YEARS + 1,
                max: MAX_HORIZON_YEARS,
            })
        );
    }

    #[test]
    fn test_goal_at_horizon_rejected() {
        let profile = UserProfile {
            horizon_years: 5,
            goals: vec![Goal::new("Late", 5, 100.0)],
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::GoalOutsideHorizon { year: 5, .. })
        ));
    }

    #[test]
    fn test_duplicate_goal_names_rejected() {
        let profile = UserProfile {
            goals: vec![Goal::new("Car", 1, 100.0), Goal::new("Car", 2, 200.0)],
            ..Default::default()
        };
        assert_eq!(
            profile.validate(),
            Err(ConfigError::DuplicateGoalName("Car".to_string()))
        );
    }

    #[test]
    fn test_savings_rate_out_of_range_rejected() {
        let profile = UserProfile {
            savings_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::FractionOutOfRange {
                field: "savings_rate",
                ..
            })
        ));
    }

    #[test]
    fn test_nan_income_rejected() {
        let profile = UserProfile {
            monthly_income: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ConfigError::NonFinite {
                field: "monthly_income",
                ..
            })
        ));
    }

    #[test]
    fn test_loan_validation() {
        assert!(Loan::new("Ok", 1_000.0, 0.0, 1).validate().is_ok());
        assert!(matches!(
            Loan::new("Zero", 0.0, 0.05, 1).validate(),
            Err(ConfigError::NonPositiveLoanPrincipal { .. })
        ));
        assert!(matches!(
            Loan::new("Neg", 1_000.0, -0.01, 1).validate(),
            Err(ConfigError::NegativeLoanRate { .. })
        ));
        assert!(matches!(
            Loan::new("Short", 1_000.0, 0.05, 0).validate(),
            Err(ConfigError::NonPositiveLoanTerm { .. })
        ));
    }
}
