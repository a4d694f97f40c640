pub mod config;
pub mod engine;
pub mod types;
pub mod validation;

pub use config::*;
pub use engine::{rank_candidates, HubScorer, NEUTRAL_SCORE};
pub use types::{CandidateLocation, CriterionScore, ScoredLocation};
pub use validation::validate_weights;
