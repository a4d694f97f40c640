use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::geo::Coordinates;

/// A site under evaluation for hub placement.
///
/// Built once per analysis run from external data and never mutated.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CandidateLocation {
    pub id: String,

    /// Human readable label, e.g. "Smithfield Square"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub coordinates: Coordinates,

    /// Raw measured value per criterion. A missing criterion means "no signal".
    #[serde(default)]
    pub criteria: BTreeMap<String, f64>,

    /// Free-form context for reports (nearest stops and the like). Not scored.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl CandidateLocation {
    pub fn new(id: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: None,
            coordinates,
            criteria: BTreeMap::new(),
            annotations: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_criterion(mut self, criterion: impl Into<String>, value: f64) -> Self {
        self.criteria.insert(criterion.into(), value);
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn raw(&self, criterion: &str) -> Option<f64> {
        self.criteria.get(criterion).copied()
    }

    /// Name if present, otherwise the identifier
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// How one criterion contributed to a candidate's aggregate score.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CriterionScore {
    pub criterion: String,
    pub raw: Option<f64>, // None when the candidate had no signal
    pub normalized: f64,  // 0-100 after min-max scaling
    pub weight: f64,      // Renormalized weight
    pub contribution: f64,
}

/// A candidate with its per-criterion sub-scores and aggregate score.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredLocation {
    pub candidate: CandidateLocation,
    pub score: f64,
    pub components: Vec<CriterionScore>,
}

impl ScoredLocation {
    pub fn id(&self) -> &str {
        &self.candidate.id
    }

    pub fn sub_score(&self, criterion: &str) -> Option<f64> {
        self.components
            .iter()
            .find(|c| c.criterion == criterion)
            .map(|c| c.normalized)
    }
}
