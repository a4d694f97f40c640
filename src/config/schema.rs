use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::network::GridConfig;
use crate::scoring::ScoringWeights;

pub const DEFAULT_TOP: usize = 10;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Criterion weights (defaults to the built-in mix when omitted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<ScoringWeights>,

    /// How many recommendations to show
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<usize>,

    /// Candidate search area for `sample`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridConfig>,

    /// YAML/JSON transport network used instead of the built-in Dublin sample
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<PathBuf>,
}

impl Config {
    pub fn effective_weights(&self) -> ScoringWeights {
        self.weights.clone().unwrap_or_default()
    }

    pub fn effective_top(&self) -> usize {
        self.top.unwrap_or(DEFAULT_TOP)
    }

    pub fn effective_grid(&self) -> GridConfig {
        self.grid.clone().unwrap_or_default()
    }
}
