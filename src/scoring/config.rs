use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TRANSPORT_CONNECTIVITY: &str = "transport_connectivity";
pub const BIKE_DEMAND: &str = "bike_demand";
pub const INFRASTRUCTURE_GAP: &str = "infrastructure_gap";
pub const ACCESSIBILITY: &str = "accessibility";
pub const POPULATION_DENSITY: &str = "population_density";

/// Scoring weights, keyed by criterion name.
///
/// Weights are plain configuration. They do not need to sum to 1.0; the
/// scorer renormalizes them before use. Only criteria listed here take part
/// in scoring, any other raw value on a candidate is ignored.
///
/// Example YAML:
/// ```yaml
/// weights:
///   transport_connectivity: 0.35
///   bike_demand: 0.25
///   infrastructure_gap: 0.2
///   accessibility: 0.15
///   population_density: 0.05
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ScoringWeights(BTreeMap<String, f64>);

impl ScoringWeights {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert, mostly useful in tests and the init wizard.
    pub fn with(mut self, criterion: impl Into<String>, weight: f64) -> Self {
        self.0.insert(criterion.into(), weight);
        self
    }

    pub fn insert(&mut self, criterion: impl Into<String>, weight: f64) {
        self.0.insert(criterion.into(), weight);
    }

    pub fn get(&self, criterion: &str) -> Option<f64> {
        self.0.get(criterion).copied()
    }

    /// Iterate criteria in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, w)| (name.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Weights rescaled so they sum to 1.0.
    ///
    /// Returns `None` only for sets [`validate_weights`](super::validate_weights)
    /// rejects: empty, all zero, negative or non-finite. Huge weights whose raw
    /// total overflows are first scaled down by the largest one.
    pub fn normalized(&self) -> Option<Vec<(String, f64)>> {
        if self.0.values().any(|w| !w.is_finite() || *w < 0.0) {
            return None;
        }
        let largest = self.0.values().copied().fold(0.0, f64::max);
        if largest <= 0.0 {
            return None;
        }

        let total = self.total();
        let (divisor, total) = if total.is_finite() {
            (1.0, total)
        } else {
            (largest, self.0.values().map(|w| w / largest).sum())
        };
        Some(
            self.0
                .iter()
                .map(|(name, w)| (name.clone(), w / divisor / total))
                .collect(),
        )
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::new()
            .with(TRANSPORT_CONNECTIVITY, 0.35)
            .with(BIKE_DEMAND, 0.25)
            .with(INFRASTRUCTURE_GAP, 0.20)
            .with(ACCESSIBILITY, 0.15)
            .with(POPULATION_DENSITY, 0.05)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ScoringWeights {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
