//! Cross-path statistics.
//!
//! Percentiles are taken per month over the full set of paths with linear
//! interpolation between order statistics, the same definition numerical
//! libraries use by default.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::model::{GoalSuccessRates, PercentileBand, SimulationResult};
use crate::path::PathOutcome;

/// Row-major `paths x months` wealth values
#[derive(Debug, Clone, PartialEq)]
pub struct WealthMatrix {
    n_paths: usize,
    n_months: usize,
    data: Vec<f64>,
}

impl WealthMatrix {
    /// Stack path trajectories; every row must be `n_months` long
    #[must_use]
    pub fn from_rows<I>(rows: I, n_months: usize) -> Self
    where
        I: IntoIterator<Item = Vec<f64>>,
    {
        let mut data = Vec::new();
        let mut n_paths = 0;
        for row in rows {
            debug_assert_eq!(row.len(), n_months);
            data.extend(row);
            n_paths += 1;
        }
        Self {
            n_paths,
            n_months,
            data,
        }
    }

    #[must_use]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    #[must_use]
    pub fn n_months(&self) -> usize {
        self.n_months
    }

    #[must_use]
    pub fn row(&self, path: usize) -> &[f64] {
        let start = path * self.n_months;
        &self.data[start..start + self.n_months]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on zero-width chunks
        self.data.chunks_exact(self.n_months.max(1))
    }

    /// All paths' values at `month`, in path order
    #[must_use]
    pub fn column(&self, month: usize) -> Vec<f64> {
        (0..self.n_paths)
            .map(|path| self.data[path * self.n_months + month])
            .collect()
    }

    /// First NaN or infinite value scanning path by path, then month by month
    #[must_use]
    pub fn first_non_finite(&self) -> Option<(usize, usize, f64)> {
        self.rows().enumerate().find_map(|(path, row)| {
            row.iter()
                .position(|w| !w.is_finite())
                .map(|month| (path, month, row[month]))
        })
    }
}

/// Percentile `q` (a fraction in `[0, 1]`) of ascending-sorted `sorted`
///
/// Interpolates linearly at rank `q * (n - 1)`. Returns NaN for an empty slice.
#[must_use]
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let lo = sorted[lower];
    let hi = sorted[upper];
    if lower == upper {
        return lo;
    }
    let value = lo + (hi - lo) * (rank - lower as f64);
    // rounding can overshoot the upper order statistic by an ulp
    if value > hi { hi } else { value }
}

fn column_bands(mut column: Vec<f64>) -> [f64; 5] {
    column.sort_unstable_by(f64::total_cmp);
    PercentileBand::ALL.map(|band| percentile(&column, band.quantile()))
}

/// The five percentile series, one value per month
#[must_use]
pub fn percentile_bands(matrix: &WealthMatrix) -> BTreeMap<PercentileBand, Vec<f64>> {
    #[cfg(feature = "parallel")]
    let per_month: Vec<[f64; 5]> = (0..matrix.n_months())
        .into_par_iter()
        .map(|month| column_bands(matrix.column(month)))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let per_month: Vec<[f64; 5]> = (0..matrix.n_months())
        .map(|month| column_bands(matrix.column(month)))
        .collect();

    PercentileBand::ALL
        .iter()
        .map(|band| {
            let series = per_month.iter().map(|values| values[*band as usize]).collect();
            (*band, series)
        })
        .collect()
}

/// Fraction of paths that funded each goal, keyed in goal order
#[must_use]
pub fn goal_success_rates(goal_names: &[&str], funded: &[Vec<bool>]) -> GoalSuccessRates {
    let n_paths = funded.len();
    let entries = goal_names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let hits = funded.iter().filter(|row| row[i]).count();
            let rate = if n_paths == 0 {
                0.0
            } else {
                hits as f64 / n_paths as f64
            };
            ((*name).to_string(), rate)
        })
        .collect();
    GoalSuccessRates::from_entries(entries)
}

/// Collapse path outcomes into the public result
#[must_use]
pub fn aggregate(
    outcomes: Vec<PathOutcome>,
    goal_names: &[&str],
    n_months: usize,
) -> (WealthMatrix, SimulationResult) {
    let (rows, funded): (Vec<_>, Vec<_>) = outcomes
        .into_iter()
        .map(|outcome| (outcome.wealth, outcome.funded))
        .unzip();
    let matrix = WealthMatrix::from_rows(rows, n_months);

    // validated horizons stay far below u32::MAX months
    let last_month = u32::try_from(n_months).unwrap_or(u32::MAX);
    let result = SimulationResult {
        times: (0..last_month).collect(),
        percentiles: percentile_bands(&matrix),
        goal_success: goal_success_rates(goal_names, &funded),
    };
    (matrix, result)
}
