//! Monte Carlo driver.
//!
//! A run is split in two phases. [`SimulationPlan`] validates the inputs and
//! precomputes everything that does not depend on randomness (monthly rates,
//! loan schedules, contributions, goal months). [`Simulator`] then fans the
//! paths out, optionally across threads, and aggregates them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::aggregate::aggregate;
use crate::amortization::{LoanSchedule, amortize_all};
use crate::cash_flow::CashFlowSchedule;
use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError, Stage};
use crate::model::{PortfolioConfig, SimulationResult, UserProfile};
use crate::path::{GoalCheck, PathOutcome, PathSimulator};
use crate::rates::RateModel;

/// Shared progress counter and cancellation flag for a running simulation
///
/// Clones share the same atomics, so one clone can be handed to a UI or a
/// signal handler while another drives the run.
#[derive(Debug, Clone)]
pub struct SimulationProgress {
    completed: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl SimulationProgress {
    #[must_use]
    pub fn new() -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            total: Arc::new(AtomicUsize::new(0)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Paths finished so far
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Paths requested by the current run
    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Completion in `[0, 1]`
    #[must_use]
    pub fn fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.completed() as f64 / total as f64,
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn reset(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for SimulationProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Path-independent inputs, computed once per run
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    rates: RateModel,
    loans: Vec<LoanSchedule>,
    cash_flow: CashFlowSchedule,
    goals: Vec<GoalCheck>,
    goal_names: Vec<String>,
}

impl SimulationPlan {
    pub fn new(profile: &UserProfile, portfolio: &PortfolioConfig) -> Result<Self> {
        profile.validate()?;
        let rates = RateModel::new(portfolio, profile)?;
        let loans = amortize_all(&profile.loans, profile.horizon_months())?;
        for loan in &loans {
            tracing::debug!(
                loan = loan.name(),
                payment = loan.payment(),
                term_months = loan.term_months(),
                "Amortized loan"
            );
        }
        let cash_flow = CashFlowSchedule::build(profile, &rates, &loans)?;

        tracing::debug!(
            monthly_mean = rates.monthly_mean(),
            monthly_std = rates.monthly_std(),
            first_contribution = cash_flow.as_slice().first().copied().unwrap_or(0.0),
            "Prepared simulation plan"
        );

        Ok(Self {
            rates,
            loans,
            cash_flow,
            goals: profile.goals.iter().map(GoalCheck::from).collect(),
            goal_names: profile.goals.iter().map(|g| g.name.clone()).collect(),
        })
    }

    #[must_use]
    pub fn rates(&self) -> &RateModel {
        &self.rates
    }

    #[must_use]
    pub fn loans(&self) -> &[LoanSchedule] {
        &self.loans
    }

    #[must_use]
    pub fn cash_flow(&self) -> &CashFlowSchedule {
        &self.cash_flow
    }

    #[must_use]
    pub fn horizon_months(&self) -> usize {
        self.cash_flow.len()
    }

    /// Path runner over this plan's inputs for the given base seed
    #[must_use]
    pub fn path_simulator(&self, seed: u64) -> PathSimulator<'_> {
        PathSimulator::new(
            self.rates.returns(),
            self.cash_flow.as_slice(),
            &self.goals,
            seed,
        )
    }
}

/// How paths are scheduled; results are identical either way
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Execution {
    /// Spread paths over the rayon thread pool when the `parallel` feature is on
    #[default]
    Parallel,
    Sequential,
}

/// A configured, ready-to-run simulation
#[derive(Debug)]
pub struct Simulator<'a> {
    plan: SimulationPlan,
    config: SimulationConfig,
    progress: Option<&'a SimulationProgress>,
    execution: Execution,
}

impl<'a> Simulator<'a> {
    pub fn new(
        profile: &UserProfile,
        portfolio: &PortfolioConfig,
        config: &SimulationConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            plan: SimulationPlan::new(profile, portfolio)?,
            config: *config,
            progress: None,
            execution: Execution::default(),
        })
    }

    #[must_use]
    pub fn with_progress(mut self, progress: &'a SimulationProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    #[must_use]
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    #[must_use]
    pub fn plan(&self) -> &SimulationPlan {
        &self.plan
    }

    pub fn run(&self) -> Result<SimulationResult> {
        let n_paths = self.config.n_paths;
        let n_months = self.plan.horizon_months();
        tracing::info!(
            n_paths,
            n_months,
            seed = self.config.seed,
            goals = self.plan.goals.len(),
            loans = self.plan.loans.len(),
            "Starting Monte Carlo simulation"
        );
        let started = Instant::now();

        if let Some(progress) = self.progress {
            progress.reset(n_paths);
        }

        let outcomes = self.run_paths().ok_or(SimulationError::Cancelled)?;

        let goal_names: Vec<&str> = self.plan.goal_names.iter().map(String::as_str).collect();
        let (matrix, result) = aggregate(outcomes, &goal_names, n_months);

        if let Some((path, month, value)) = matrix.first_non_finite() {
            tracing::warn!(path, month, value, "Wealth became non-finite");
            return Err(SimulationError::NumericInstability {
                stage: Stage::Compounding,
                path: Some(path),
                month,
                value,
            });
        }

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Monte Carlo simulation finished"
        );
        Ok(result)
    }

    /// `None` once cancellation is observed
    fn run_paths(&self) -> Option<Vec<PathOutcome>> {
        let sim = self.plan.path_simulator(self.config.seed);
        let run_one = |path: usize| -> Option<PathOutcome> {
            if self.progress.is_some_and(SimulationProgress::is_cancelled) {
                return None;
            }
            let outcome = sim.run(path);
            if let Some(progress) = self.progress {
                progress.increment();
            }
            Some(outcome)
        };

        match self.execution {
            #[cfg(feature = "parallel")]
            Execution::Parallel => (0..self.config.n_paths)
                .into_par_iter()
                .map(run_one)
                .collect(),
            _ => (0..self.config.n_paths).map(run_one).collect(),
        }
    }
}

/// Run the full Monte Carlo simulation
pub fn simulate(
    profile: &UserProfile,
    portfolio: &PortfolioConfig,
    config: &SimulationConfig,
) -> Result<SimulationResult> {
    Simulator::new(profile, portfolio, config)?.run()
}

/// [`simulate`], reporting per-path progress and honouring cancellation
pub fn simulate_with_progress(
    profile: &UserProfile,
    portfolio: &PortfolioConfig,
    config: &SimulationConfig,
    progress: &SimulationProgress,
) -> Result<SimulationResult> {
    Simulator::new(profile, portfolio, config)?
        .with_progress(progress)
        .run()
}
