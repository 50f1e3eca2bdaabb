//! Plain-text report of a simulation result.

use futurebank_core::amortization::LoanSchedule;
use futurebank_core::{PercentileBand, Scenario, SimulationResult};
use jiff::Span;
use jiff::civil::Date;

use crate::util::{format_amount, format_amount_precise, format_percentage};

const COLUMN_WIDTH: usize = 14;

/// Calendar label such as `Dec 2026` for month `month` counted from `start`
pub fn month_label(start: Date, month: usize) -> String {
    Span::new()
        .try_months(month as i64)
        .and_then(|span| start.checked_add(span))
        .map(|date| date.strftime("%b %Y").to_string())
        .unwrap_or_else(|_| "-".to_string())
}

fn write_header(out: &mut String) {
    out.push_str(&format!(
        "{:>5}  {:>6}  {:<8}  {:>4}",
        "Year", "Month", "Date", "Age"
    ));
    for band in PercentileBand::ALL {
        out.push_str(&format!("  {:>width$}", band.label(), width = COLUMN_WIDTH));
    }
    out.push('\n');
}

/// Render the yearly percentile table, goal probabilities and loan summary
pub fn render_report(scenario: &Scenario, result: &SimulationResult, start: Date) -> String {
    let profile = &scenario.profile;
    let mut out = String::new();

    out.push_str(&format!(
        "FutureBank projection: {} paths, seed {}, {} years from age {}\n",
        scenario.simulation.n_paths, scenario.simulation.seed, profile.horizon_years, profile.start_age
    ));
    out.push_str(&format!(
        "Portfolio: expected return {}, volatility {}\n\n",
        format_percentage(scenario.portfolio.expected_return),
        format_percentage(scenario.portfolio.volatility)
    ));

    write_header(&mut out);
    for row in result.yearly_rows() {
        let month = row.month as usize;
        out.push_str(&format!(
            "{:>5}  {:>6}  {:<8}  {:>4}",
            row.year,
            month,
            month_label(start, month),
            profile.age_at_month(month)
        ));
        for band in PercentileBand::ALL {
            out.push_str(&format!(
                "  {:>width$}",
                format_amount(row.get(band)),
                width = COLUMN_WIDTH
            ));
        }
        out.push('\n');
    }

    if !profile.goals.is_empty() {
        out.push_str("\nGoals\n");
        for goal in &profile.goals {
            let probability = result.goal_success(&goal.name).unwrap_or(0.0);
            out.push_str(&format!(
                "  {} (year {}, amount {}): {}\n",
                goal.name,
                goal.year,
                format_amount(goal.amount),
                format_percentage(probability)
            ));
        }
    }

    if !profile.loans.is_empty() {
        out.push_str("\nLoans\n");
        for loan in &profile.loans {
            let line = match LoanSchedule::new(loan, profile.horizon_months()) {
                Ok(schedule) => format!(
                    "  {}: {} a month for {} months, total interest {}\n",
                    schedule.name(),
                    format_amount_precise(schedule.payment()),
                    schedule.term_months(),
                    format_amount_precise(schedule.total_interest())
                ),
                Err(e) => format!("  {}: {}\n", loan.name, e),
            };
            out.push_str(&line);
        }
    }

    out
}

/// Pretty-printed JSON of the raw result
pub fn render_json(result: &SimulationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
