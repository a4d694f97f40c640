use std::time::Instant;

use crate::error::HubError;
use crate::network::{derive_candidates, GridConfig, TransportNetwork};
use crate::scoring::{CandidateLocation, HubScorer, ScoredLocation, ScoringWeights};

/// Sample the grid and derive every criterion for each point.
pub fn grid_candidates(
    grid: &GridConfig,
    network: &TransportNetwork,
) -> Result<Vec<CandidateLocation>, HubError> {
    grid.validate()
        .map_err(|errors| HubError::configuration(errors.join("; ")))?;

    let points = grid.points();
    let candidates = derive_candidates(&points, network);
    tracing::info!(candidates = candidates.len(), "generated grid candidates");
    Ok(candidates)
}

/// Rank candidates and keep the best `top` (0 keeps everything).
///
/// Used by the CLI for both file input and the sample grid.
pub fn recommend(
    candidates: &[CandidateLocation],
    weights: &ScoringWeights,
    top: usize,
) -> Result<Vec<ScoredLocation>, HubError> {
    let start = Instant::now();
    let scorer = HubScorer::new(weights)?;
    let mut ranked = scorer.rank(candidates)?;

    if top > 0 {
        ranked.truncate(top);
    }

    tracing::info!(
        evaluated = candidates.len(),
        kept = ranked.len(),
        elapsed = %humantime::format_duration(start.elapsed()),
        "generated hub recommendations"
    );
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::sample::{dublin_network, sample_sites};
    use crate::scoring::TRANSPORT_CONNECTIVITY;

    #[test]
    fn test_sample_pipeline_top_five() {
        let network = dublin_network(12);
        let candidates = grid_candidates(&GridConfig::default(), &network).unwrap();
        assert_eq!(candidates.len(), 400);

        let ranked = recommend(&candidates, &ScoringWeights::default(), 5).unwrap();
        assert_eq!(ranked.len(), 5);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        // Population density is flat across the grid
        assert_eq!(ranked[0].sub_score("population_density"), Some(50.0));
    }

    #[test]
    fn test_top_zero_keeps_all() {
        let network = dublin_network(12);
        let grid = GridConfig {
            rows: 3,
            cols: 4,
            ..GridConfig::default()
        };
        let candidates = grid_candidates(&grid, &network).unwrap();
        let ranked = recommend(&candidates, &ScoringWeights::default(), 0).unwrap();
        assert_eq!(ranked.len(), 12);
    }

    #[test]
    fn test_invalid_grid_is_configuration_error() {
        let grid = GridConfig {
            rows: 0,
            ..GridConfig::default()
        };
        let err = grid_candidates(&grid, &TransportNetwork::default()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_best_connected_point_scores_full_marks() {
        let network = dublin_network(12);
        let candidates = grid_candidates(&GridConfig::default(), &network).unwrap();
        let weights = ScoringWeights::new().with(TRANSPORT_CONNECTIVITY, 1.0);
        let ranked = recommend(&candidates, &weights, 1).unwrap();
        // The best-connected grid point sits at the top of the min-max range
        assert_eq!(ranked[0].score, 100.0);
    }

    #[test]
    fn test_empty_candidates_is_input_error() {
        let err = recommend(&[], &ScoringWeights::default(), 10).unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_rank_sample_sites() {
        let sites = sample_sites(&dublin_network(8));
        let ranked = recommend(&sites, &ScoringWeights::default(), 0).unwrap();
        assert_eq!(ranked.len(), 5);
        for s in &ranked {
            assert!(s.candidate.name.is_some());
            assert!((0.0..=100.0).contains(&s.score));
        }
    }
}
