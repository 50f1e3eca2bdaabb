//! Fixed-rate loan amortization.
//!
//! Payments are level annuities computed once per loan; the outstanding
//! balance is rolled forward month by month for reporting.

use crate::error::ConfigError;
use crate::model::{Loan, MONTHS_PER_YEAR};

/// Interest over the whole term is below f64 resolution, so the annuity
/// degenerates to an even split of the principal
fn is_negligible_rate(monthly_rate: f64, n_months: usize) -> bool {
    monthly_rate * (n_months as f64) < f64::EPSILON
}

/// Level monthly payment that retires `principal` in `n_months` at `annual_rate`
///
/// A zero rate spreads the principal evenly over the term. The annuity
/// factor `1 - (1+r)^-n` is evaluated through `ln_1p`/`exp_m1`, which keeps
/// it accurate for rates far below `f64::EPSILON` and for any term length.
#[must_use]
pub fn monthly_payment(principal: f64, annual_rate: f64, n_months: usize) -> f64 {
    if n_months == 0 {
        return 0.0;
    }
    let r = annual_rate / MONTHS_PER_YEAR as f64;
    if is_negligible_rate(r, n_months) {
        return principal / n_months as f64;
    }
    let discount = -(-(n_months as f64) * r.ln_1p()).exp_m1();
    principal * r / discount
}

/// Payment and balance schedule of one loan, truncated to the horizon
#[derive(Debug, Clone, PartialEq)]
pub struct LoanSchedule {
    name: String,
    principal: f64,
    monthly_rate: f64,
    payment: f64,
    term_months: usize,
    /// Balance after the payment of each month, `min(term, horizon)` entries
    balances: Vec<f64>,
}

impl LoanSchedule {
    pub fn new(loan: &Loan, horizon_months: usize) -> Result<Self, ConfigError> {
        loan.validate()?;

        let term_months = loan.term_months();
        let monthly_rate = loan.annual_rate / MONTHS_PER_YEAR as f64;
        let payment = monthly_payment(loan.principal, loan.annual_rate, term_months);

        let len = term_months.min(horizon_months);
        let mut balances = Vec::with_capacity(len);
        let mut balance = loan.principal;
        for _ in 0..len {
            let interest = balance * monthly_rate;
            balance = (balance + interest - payment).max(0.0);
            balances.push(balance);
        }

        Ok(Self {
            name: loan.name.clone(),
            principal: loan.principal,
            monthly_rate,
            payment,
            term_months,
            balances,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn principal(&self) -> f64 {
        self.principal
    }

    #[must_use]
    pub fn payment(&self) -> f64 {
        self.payment
    }

    #[must_use]
    pub fn term_months(&self) -> usize {
        self.term_months
    }

    #[must_use]
    pub fn balances(&self) -> &[f64] {
        &self.balances
    }

    /// Payment due in `month`; zero once the term has ended
    #[must_use]
    pub fn payment_at(&self, month: usize) -> f64 {
        if month < self.term_months {
            self.payment
        } else {
            0.0
        }
    }

    /// Outstanding balance after the payment of `month`
    ///
    /// Months past the stored horizon fall back to the closed-form annuity
    /// balance `P · (1 - (1+r)^-(n-k)) / (1 - (1+r)^-n)` after `k` payments.
    #[must_use]
    pub fn balance_at(&self, month: usize) -> f64 {
        if let Some(balance) = self.balances.get(month) {
            return *balance;
        }
        let paid = month.saturating_add(1);
        if paid >= self.term_months {
            return 0.0;
        }
        let remaining = self.term_months - paid;
        if is_negligible_rate(self.monthly_rate, self.term_months) {
            return self.principal * remaining as f64 / self.term_months as f64;
        }
        let log_growth = self.monthly_rate.ln_1p();
        let left = (-(remaining as f64) * log_growth).exp_m1();
        let full = (-(self.term_months as f64) * log_growth).exp_m1();
        (self.principal * left / full).max(0.0)
    }

    /// Interest paid over the full term
    #[must_use]
    pub fn total_interest(&self) -> f64 {
        (self.payment * self.term_months as f64 - self.principal).max(0.0)
    }
}

/// Schedules for every loan, in input order
pub fn amortize_all(loans: &[Loan], horizon_months: usize) -> Result<Vec<LoanSchedule>, ConfigError> {
    loans
        .iter()
        .map(|loan| LoanSchedule::new(loan, horizon_months))
        .collect()
}

/// Sum of payments due across all loans in `month`
#[must_use]
pub fn total_payment_at(schedules: &[LoanSchedule], month: usize) -> f64 {
    schedules.iter().map(|s| s.payment_at(month)).sum()
}
