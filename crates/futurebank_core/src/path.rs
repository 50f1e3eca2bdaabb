//! Single-path wealth evolution.
//!
//! Wealth starts at zero. Each month the balance compounds at that month's
//! sampled return, then the deterministic contribution is added:
//!
//! ```text
//! W[m] = W[m-1] * (1 + r[path, m]) + cf[m]
//! ```
//!
//! Goals are checked against the post-contribution balance at their month.

use rand_distr::Normal;

use crate::model::Goal;
use crate::rng;

/// Goal threshold resolved to a month index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalCheck {
    pub month: usize,
    pub amount: f64,
}

impl From<&Goal> for GoalCheck {
    fn from(goal: &Goal) -> Self {
        Self {
            month: goal.month_index(),
            amount: goal.amount,
        }
    }
}

/// Wealth trajectory of one path plus which goals it met
#[derive(Debug, Clone, PartialEq)]
pub struct PathOutcome {
    pub wealth: Vec<f64>,
    /// Aligned with the goal list; NaN wealth never counts as funded
    pub funded: Vec<bool>,
}

/// Shared, read-only inputs for running any path
#[derive(Debug, Clone, Copy)]
pub struct PathSimulator<'a> {
    returns: &'a Normal<f64>,
    contributions: &'a [f64],
    goals: &'a [GoalCheck],
    seed: u64,
}

impl<'a> PathSimulator<'a> {
    pub fn new(
        returns: &'a Normal<f64>,
        contributions: &'a [f64],
        goals: &'a [GoalCheck],
        seed: u64,
    ) -> Self {
        Self {
            returns,
            contributions,
            goals,
            seed,
        }
    }

    #[must_use]
    pub fn horizon_months(&self) -> usize {
        self.contributions.len()
    }

    /// Run path `path_index`; the outcome depends only on the index and the seed
    #[must_use]
    pub fn run(&self, path_index: usize) -> PathOutcome {
        let mut wealth = Vec::with_capacity(self.contributions.len());
        let mut balance = 0.0;
        for (month, contribution) in self.contributions.iter().enumerate() {
            let r = rng::draw(self.returns, self.seed, path_index, month);
            balance = balance * (1.0 + r) + contribution;
            wealth.push(balance);
        }

        let funded = self
            .goals
            .iter()
            .map(|goal| wealth.get(goal.month).is_some_and(|w| *w >= goal.amount))
            .collect();

        PathOutcome { wealth, funded }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_returns(monthly: f64) -> Normal<f64> {
        Normal::new(monthly, 0.0).unwrap()
    }

    #[test]
    fn test_zero_return_accumulates_contributions() {
        let returns = flat_returns(0.0);
        let contributions = vec![7_000.0; 12];
        let sim = PathSimulator::new(&returns, &contributions, &[], 1);
        let outcome = sim.run(0);
        assert_eq!(outcome.wealth.len(), 12);
        assert_eq!(outcome.wealth[0], 7_000.0);
        assert_eq!(outcome.wealth[11], 84_000.0);
        assert!(outcome.funded.is_empty());
    }

    #[test]
    fn test_compounding_order() {
        let returns = flat_returns(0.1);
        let contributions = vec![100.0, 100.0, 0.0];
        let sim = PathSimulator::new(&returns, &contributions, &[], 1);
        let wealth = sim.run(3).wealth;
        // month 0 compounds an empty balance
        assert!((wealth[0] - 100.0).abs() < 1e-12);
        assert!((wealth[1] - 210.0).abs() < 1e-12);
        assert!((wealth[2] - 231.0).abs() < 1e-12);
    }

    #[test]
    fn test_goal_checked_at_exact_month() {
        let returns = flat_returns(0.0);
        let contributions = vec![100.0; 36];
        let goals = [
            GoalCheck {
                month: 12,
                amount: 1_300.0,
            },
            GoalCheck {
                month: 12,
                amount: 1_301.0,
            },
            GoalCheck {
                month: 0,
                amount: 100.0,
            },
        ];
        let sim = PathSimulator::new(&returns, &contributions, &goals, 1);
        assert_eq!(sim.run(0).funded, [true, false, true]);
    }

    #[test]
    fn test_same_index_same_path() {
        let returns = Normal::new(0.01, 0.05).unwrap();
        let contributions = vec![50.0; 48];
        let sim = PathSimulator::new(&returns, &contributions, &[], 99);
        assert_eq!(sim.run(17), sim.run(17));
        assert_ne!(sim.run(17).wealth, sim.run(18).wealth);
    }
}
