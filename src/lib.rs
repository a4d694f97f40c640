//! Mobility hub site recommendation.
//!
//! Candidate locations carry raw criteria (transport connectivity, bike
//! demand, infrastructure gaps, ...). [`scoring::HubScorer`] min-max scales
//! each weighted criterion to 0-100 across the candidate set, mixes them by
//! weight and ranks the result.

pub mod config;
pub mod error;
pub mod geo;
pub mod input;
pub mod logging;
pub mod network;
pub mod output;
pub mod pipeline;
pub mod scoring;

pub use error::HubError;
pub use geo::Coordinates;
pub use scoring::{rank_candidates, CandidateLocation, HubScorer, ScoredLocation, ScoringWeights};
