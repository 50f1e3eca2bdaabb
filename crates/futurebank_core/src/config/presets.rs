//! Ready-made goals, loans and the demo scenario.

use super::{Scenario, SimulationConfig};
use crate::model::{Goal, Loan, PortfolioConfig, UserProfile};

#[must_use]
pub fn car_goal() -> Goal {
    Goal::new("Car", 2, 700_000.0)
}

#[must_use]
pub fn masters_goal() -> Goal {
    Goal::new("Masters", 4, 2_000_000.0)
}

#[must_use]
pub fn house_goal() -> Goal {
    Goal::new("House", 6, 3_000_000.0)
}

/// 500k education loan at 12% over five years
#[must_use]
pub fn education_loan() -> Loan {
    Loan::new("EduLoan", 500_000.0, 0.12, 5)
}

impl Scenario {
    /// Default profile with every preset goal and the education loan attached
    #[must_use]
    pub fn demo() -> Self {
        Self {
            profile: UserProfile {
                goals: vec![car_goal(), masters_goal(), house_goal()],
                loans: vec![education_loan()],
                ..Default::default()
            },
            portfolio: PortfolioConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_scenario_is_valid() {
        let demo = Scenario::demo();
        assert!(demo.validate().is_ok());
        assert_eq!(demo.profile.goals.len(), 3);
        assert_eq!(demo.profile.loans.len(), 1);
        assert_eq!(demo.simulation.seed, 42);
    }
}
