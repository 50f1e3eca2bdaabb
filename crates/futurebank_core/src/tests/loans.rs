//! Tests for loans flowing through the simulation
//!
//! These tests verify that:
//! - Each active loan's payment is deducted from the monthly contribution
//! - Payments stop once a loan's term ends
//! - Loans longer than the horizon are paid for the whole horizon

use super::{fixed_portfolio, salary_only_profile, small_run};
use crate::config::presets::education_loan;
use crate::model::{Loan, PercentileBand, UserProfile};
use crate::simulation::{SimulationPlan, simulate};

fn with_loans(loans: Vec<Loan>, years: u32) -> UserProfile {
    UserProfile {
        loans,
        ..salary_only_profile(years)
    }
}

#[test]
fn test_loan_reduces_wealth_by_total_payments() {
    let without = simulate(&salary_only_profile(2), &fixed_portfolio(0.0), &small_run(5)).unwrap();
    let loan = Loan::new("Laptop", 24_000.0, 0.0, 1);
    let with = simulate(
        &with_loans(vec![loan], 2),
        &fixed_portfolio(0.0),
        &small_run(5),
    )
    .unwrap();

    let gap = without.final_value(PercentileBand::P50).unwrap()
        - with.final_value(PercentileBand::P50).unwrap();
    assert!((gap - 24_000.0).abs() < 1e-6);

    // the gap stops widening once the loan is repaid
    let gap_at_term = without.value_at(PercentileBand::P50, 11).unwrap()
        - with.value_at(PercentileBand::P50, 11).unwrap();
    assert!((gap_at_term - 24_000.0).abs() < 1e-6);
}

#[test]
fn test_education_loan_contributions() {
    let profile = with_loans(vec![education_loan()], 10);
    let plan = SimulationPlan::new(&profile, &fixed_portfolio(0.0)).unwrap();
    let schedule = &plan.loans()[0];

    assert!((schedule.payment() - 11_122.22).abs() < 0.01);
    assert!(schedule.balance_at(59) <= 0.01);

    let flows = plan.cash_flow();
    assert!((flows.at(0) - (7_000.0 - schedule.payment())).abs() < 1e-9);
    assert!((flows.at(59) - (7_000.0 - schedule.payment())).abs() < 1e-9);
    assert!((flows.at(60) - 7_000.0).abs() < 1e-9);
}

#[test]
fn test_loan_longer_than_horizon() {
    let mortgage = Loan::new("Mortgage", 250_000.0, 0.05, 25);
    let profile = with_loans(vec![mortgage], 3);
    let plan = SimulationPlan::new(&profile, &fixed_portfolio(0.0)).unwrap();

    let schedule = &plan.loans()[0];
    assert_eq!(schedule.balances().len(), 36);
    assert!(schedule.balance_at(35) > 200_000.0);
    let payment = schedule.payment();
    assert!(
        plan.cash_flow()
            .as_slice()
            .iter()
            .all(|c| (c - (7_000.0 - payment)).abs() < 1e-9)
    );
}

#[test]
fn test_multiple_loans_stack() {
    let loans = vec![
        Loan::new("A", 12_000.0, 0.0, 1),
        Loan::new("B", 36_000.0, 0.0, 3),
    ];
    let plan = SimulationPlan::new(&with_loans(loans, 4), &fixed_portfolio(0.0)).unwrap();
    let flows = plan.cash_flow();
    assert!((flows.at(0) - 5_000.0).abs() < 1e-9);
    assert!((flows.at(12) - 6_000.0).abs() < 1e-9);
    assert!((flows.at(36) - 7_000.0).abs() < 1e-9);
}

#[test]
fn test_loan_can_push_wealth_negative() {
    let loan = Loan::new("Huge", 2_000_000.0, 0.1, 5);
    let result = simulate(&with_loans(vec![loan], 2), &fixed_portfolio(0.0), &small_run(3)).unwrap();
    assert!(result.final_value(PercentileBand::P95).unwrap() < 0.0);
}

#[test]
fn test_tiny_rate_loan_matches_interest_free_loan() {
    let free = simulate(
        &with_loans(vec![Loan::new("Free", 500_000.0, 0.0, 5)], 6),
        &fixed_portfolio(0.0),
        &small_run(3),
    )
    .unwrap();
    for rate in [1e-17, 1e-13] {
        let result = simulate(
            &with_loans(vec![Loan::new("Nearly free", 500_000.0, rate, 5)], 6),
            &fixed_portfolio(0.0),
            &small_run(3),
        )
        .unwrap();
        for band in PercentileBand::ALL {
            let gap = result.final_value(band).unwrap() - free.final_value(band).unwrap();
            assert!(gap.abs() < 1e-3, "rate {rate}, {band:?}: gap {gap}");
        }
    }
}
