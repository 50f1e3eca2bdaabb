//! Simulation output consumed by charting and advice collaborators.
//!
//! The percentile labels (`p5` … `p95`) and goal-name keys are part of the
//! serialized contract and must stay stable.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::MONTHS_PER_YEAR;

/// One of the five fixed cross-path percentile bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentileBand {
    P5,
    P25,
    P50,
    P75,
    P95,
}

impl PercentileBand {
    pub const ALL: [PercentileBand; 5] = [
        PercentileBand::P5,
        PercentileBand::P25,
        PercentileBand::P50,
        PercentileBand::P75,
        PercentileBand::P95,
    ];

    /// Quantile as a fraction in `[0, 1]`
    #[must_use]
    pub fn quantile(self) -> f64 {
        match self {
            PercentileBand::P5 => 0.05,
            PercentileBand::P25 => 0.25,
            PercentileBand::P50 => 0.50,
            PercentileBand::P75 => 0.75,
            PercentileBand::P95 => 0.95,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PercentileBand::P5 => "p5",
            PercentileBand::P25 => "p25",
            PercentileBand::P50 => "p50",
            PercentileBand::P75 => "p75",
            PercentileBand::P95 => "p95",
        }
    }
}

impl fmt::Display for PercentileBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Goal name to success probability, iterated in the profile's goal order
///
/// Serialized as a plain map so consumers can look goals up by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalSuccessRates(Vec<(String, f64)>);

impl GoalSuccessRates {
    pub(crate) fn from_entries(entries: Vec<(String, f64)>) -> Self {
        Self(entries)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(goal, _)| goal == name)
            .map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, p)| (name.as_str(), *p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for GoalSuccessRates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, p)| (name, p)))
    }
}

impl<'de> Deserialize<'de> for GoalSuccessRates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RatesVisitor;

        impl<'de> Visitor<'de> for RatesVisitor {
            type Value = GoalSuccessRates;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of goal name to success probability")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, p)) = map.next_entry::<String, f64>()? {
                    entries.push((name, p));
                }
                Ok(GoalSuccessRates(entries))
            }
        }

        deserializer.deserialize_map(RatesVisitor)
    }
}

/// All five bands at one year-end month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyRow {
    /// 1-based simulation year
    pub year: u32,
    pub month: u32,
    pub values: [f64; 5],
}

impl YearlyRow {
    #[must_use]
    pub fn get(&self, band: PercentileBand) -> f64 {
        self.values[band as usize]
    }
}

/// Aggregated outcome of one `simulate` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Month indices `0..horizon_months`
    pub times: Vec<u32>,
    /// Wealth per band, each aligned with `times`
    pub percentiles: BTreeMap<PercentileBand, Vec<f64>>,
    pub goal_success: GoalSuccessRates,
}

impl SimulationResult {
    #[must_use]
    pub fn horizon_months(&self) -> usize {
        self.times.len()
    }

    /// Wealth series for one band (empty if the band is absent)
    #[must_use]
    pub fn band(&self, band: PercentileBand) -> &[f64] {
        self.percentiles.get(&band).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn value_at(&self, band: PercentileBand, month: usize) -> Option<f64> {
        self.band(band).get(month).copied()
    }

    /// Wealth at the last simulated month
    #[must_use]
    pub fn final_value(&self, band: PercentileBand) -> Option<f64> {
        self.band(band).last().copied()
    }

    #[must_use]
    pub fn goal_success(&self, name: &str) -> Option<f64> {
        self.goal_success.get(name)
    }

    /// One row per simulated year, taken at each year's last month
    #[must_use]
    pub fn yearly_rows(&self) -> Vec<YearlyRow> {
        let years = self.horizon_months() / MONTHS_PER_YEAR;
        (1..=years)
            .map(|year| {
                let month = year * MONTHS_PER_YEAR - 1;
                let mut values = [0.0; 5];
                for band in PercentileBand::ALL {
                    values[band as usize] = self.value_at(band, month).unwrap_or(f64::NAN);
                }
                YearlyRow {
                    year: year as u32,
                    month: month as u32,
                    values,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> SimulationResult {
        let times: Vec<u32> = (0..24).collect();
        let percentiles = PercentileBand::ALL
            .iter()
            .map(|band| {
                let offset = (*band as usize) as f64 * 10.0;
                (*band, times.iter().map(|t| *t as f64 + offset).collect())
            })
            .collect();
        SimulationResult {
            times,
            percentiles,
            goal_success: GoalSuccessRates::from_entries(vec![
                ("House".to_string(), 0.25),
                ("Car".to_string(), 0.9),
            ]),
        }
    }

    #[test]
    fn test_band_labels_serialize_as_stable_keys() {
        let json = serde_json::to_value(sample_result()).unwrap();
        let mut keys: Vec<&String> = json["percentiles"].as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(keys, ["p25", "p5", "p50", "p75", "p95"]);
        assert_eq!(json["goal_success"]["Car"], 0.9);
    }

    #[test]
    fn test_goal_success_preserves_profile_order() {
        let result = sample_result();
        let names: Vec<&str> = result.goal_success.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["House", "Car"]);

        let json = serde_json::to_string(&result).unwrap();
        let back: SimulationResult = serde_json::from_str(&json).unwrap();
        let names: Vec<&str> = back.goal_success.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["House", "Car"]);
        assert_eq!(back.goal_success("House"), Some(0.25));
    }

    #[test]
    fn test_yearly_rows_use_year_end_months() {
        let rows = sample_result().yearly_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, 11);
        assert_eq!(rows[1].month, 23);
        assert_eq!(rows[1].get(PercentileBand::P50), 43.0);
    }

    #[test]
    fn test_missing_band_is_empty() {
        let mut result = sample_result();
        result.percentiles.remove(&PercentileBand::P75);
        assert!(result.band(PercentileBand::P75).is_empty());
        assert_eq!(result.final_value(PercentileBand::P75), None);
        assert_eq!(result.final_value(PercentileBand::P95), Some(63.0));
    }
}
