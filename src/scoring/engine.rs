use std::collections::HashSet;

use super::config::ScoringWeights;
use super::types::{CandidateLocation, CriterionScore, ScoredLocation};
use super::validation::validate_weights;
use crate::error::HubError;

/// Sub-score given to every candidate when a criterion does not vary.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Ranks candidate locations against a fixed set of weights.
///
/// Weights are validated and renormalized once on construction, so a scorer
/// can rank any number of candidate sets.
#[derive(Debug, Clone)]
pub struct HubScorer {
    weights: Vec<(String, f64)>,
}

impl HubScorer {
    pub fn new(weights: &ScoringWeights) -> Result<Self, HubError> {
        validate_weights(weights).map_err(|errors| HubError::configuration(errors.join("; ")))?;
        let weights = weights
            .normalized()
            .ok_or_else(|| HubError::configuration("weights: cannot be renormalized"))?;
        Ok(Self { weights })
    }

    /// Renormalized weights in criterion name order.
    pub fn weights(&self) -> &[(String, f64)] {
        &self.weights
    }

    /// Score and rank candidates: aggregate score descending, identifier
    /// ascending on ties.
    pub fn rank(&self, candidates: &[CandidateLocation]) -> Result<Vec<ScoredLocation>, HubError> {
        validate_candidates(candidates)?;

        let ranges: Vec<Option<ValueRange>> = self
            .weights
            .iter()
            .map(|(criterion, _)| ValueRange::of(candidates, criterion))
            .collect();

        let mut scored: Vec<ScoredLocation> = candidates
            .iter()
            .map(|candidate| self.score_one(candidate, &ranges))
            .collect();

        scored.sort_by(|a, b| {
            // Primary: score descending
            let score_cmp = b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal);
            if score_cmp != std::cmp::Ordering::Equal {
                return score_cmp;
            }
            // Tie-breaker: identifier ascending
            a.candidate.id.cmp(&b.candidate.id)
        });

        tracing::debug!(
            candidates = scored.len(),
            criteria = self.weights.len(),
            "ranked candidate locations"
        );

        Ok(scored)
    }

    fn score_one(
        &self,
        candidate: &CandidateLocation,
        ranges: &[Option<ValueRange>],
    ) -> ScoredLocation {
        let mut components = Vec::with_capacity(self.weights.len());
        let mut score = 0.0;

        for ((criterion, weight), range) in self.weights.iter().zip(ranges) {
            let raw = candidate.raw(criterion);
            let normalized = match (raw, range) {
                (Some(value), Some(range)) => range.normalize(value),
                // No signal
                _ => 0.0,
            };
            let contribution = normalized * weight;
            score += contribution;

            components.push(CriterionScore {
                criterion: criterion.clone(),
                raw,
                normalized,
                weight: *weight,
                contribution,
            });
        }

        ScoredLocation {
            candidate: candidate.clone(),
            score: score.clamp(0.0, 100.0),
            components,
        }
    }
}

/// Validate weights, then score and rank candidates in one call.
pub fn rank_candidates(
    candidates: &[CandidateLocation],
    weights: &ScoringWeights,
) -> Result<Vec<ScoredLocation>, HubError> {
    HubScorer::new(weights)?.rank(candidates)
}

fn validate_candidates(candidates: &[CandidateLocation]) -> Result<(), HubError> {
    if candidates.is_empty() {
        return Err(HubError::input("no candidate locations to rank"));
    }

    let mut seen = HashSet::new();
    for candidate in candidates {
        if candidate.id.trim().is_empty() {
            return Err(HubError::input("candidate with an empty identifier"));
        }
        if !seen.insert(candidate.id.as_str()) {
            return Err(HubError::input(format!(
                "duplicate candidate identifier '{}'",
                candidate.id
            )));
        }
        if !candidate.coordinates.is_finite() {
            return Err(HubError::input(format!(
                "candidate '{}' has non-finite coordinates",
                candidate.id
            )));
        }
        if let Some((criterion, value)) =
            candidate.criteria.iter().find(|(_, v)| !v.is_finite())
        {
            return Err(HubError::input(format!(
                "candidate '{}' has non-finite value {} for '{}'",
                candidate.id, value, criterion
            )));
        }
    }

    Ok(())
}

/// Observed min/max of one criterion across the candidates that carry it.
#[derive(Debug, Clone, Copy)]
struct ValueRange {
    min: f64,
    max: f64,
}

impl ValueRange {
    fn of(candidates: &[CandidateLocation], criterion: &str) -> Option<Self> {
        candidates
            .iter()
            .filter_map(|c| c.raw(criterion))
            .fold(None, |acc: Option<ValueRange>, v| match acc {
                None => Some(ValueRange { min: v, max: v }),
                Some(r) => Some(ValueRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    /// Min-max scale to 0-100
    fn normalize(&self, value: f64) -> f64 {
        if self.min == self.max {
            return NEUTRAL_SCORE;
        }
        let span = self.max - self.min;
        let scaled = if span.is_finite() {
            (value - self.min) / span
        } else {
            // Range wider than f64::MAX: halve both ends so the span stays finite
            (value / 2.0 - self.min / 2.0) / (self.max / 2.0 - self.min / 2.0)
        };
        (scaled * 100.0).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinates;

    fn candidate(id: &str, criteria: &[(&str, f64)]) -> CandidateLocation {
        criteria.iter().fold(
            CandidateLocation::new(id, Coordinates::new(53.34, -6.26)),
            |c, (name, value)| c.with_criterion(*name, *value),
        )
    }

    fn single(weight: f64) -> ScoringWeights {
        ScoringWeights::new().with("value", weight)
    }

    fn ids(ranked: &[ScoredLocation]) -> Vec<&str> {
        ranked.iter().map(|s| s.id()).collect()
    }

    #[test]
    fn test_min_max_example() {
        let candidates = vec![
            candidate("A", &[("value", 10.0)]),
            candidate("B", &[("value", 20.0)]),
            candidate("C", &[("value", 30.0)]),
        ];
        let ranked = rank_candidates(&candidates, &single(1.0)).unwrap();

        assert_eq!(ids(&ranked), vec!["C", "B", "A"]);
        assert_eq!(ranked[0].score, 100.0);
        assert_eq!(ranked[1].score, 50.0);
        assert_eq!(ranked[2].score, 0.0);
        assert_eq!(ranked[1].sub_score("value"), Some(50.0));
    }

    #[test]
    fn test_output_length_matches_input() {
        let candidates: Vec<_> = (0..25)
            .map(|i| {
                candidate(
                    &format!("site-{:02}", i),
                    &[("a", (i * 7 % 11) as f64), ("b", i as f64)],
                )
            })
            .collect();
        let weights = ScoringWeights::new().with("a", 0.3).with("b", 0.7);
        let ranked = rank_candidates(&candidates, &weights).unwrap();
        assert_eq!(ranked.len(), candidates.len());
    }

    #[test]
    fn test_scores_within_bounds_and_sorted() {
        let candidates: Vec<_> = (0..40)
            .map(|i| {
                let x = i as f64;
                candidate(
                    &format!("site-{:02}", i),
                    &[("a", (x * 1.7).sin() * 50.0), ("b", x * x), ("c", -x)],
                )
            })
            .collect();
        let weights = ScoringWeights::new().with("a", 5.0).with("b", 1.0).with("c", 4.0);
        let ranked = rank_candidates(&candidates, &weights).unwrap();

        for s in &ranked {
            assert!((0.0..=100.0).contains(&s.score), "score {} out of range", s.score);
            for c in &s.components {
                assert!((0.0..=100.0).contains(&c.normalized));
            }
        }
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(pair[0].id() < pair[1].id());
            }
        }
    }

    #[test]
    fn test_identical_values_are_neutral() {
        let candidates = vec![
            candidate("A", &[("flat", 7.0), ("varied", 1.0)]),
            candidate("B", &[("flat", 7.0), ("varied", 2.0)]),
            candidate("C", &[("flat", 7.0), ("varied", 3.0)]),
        ];
        let weights = ScoringWeights::new().with("flat", 0.5).with("varied", 0.5);
        let ranked = rank_candidates(&candidates, &weights).unwrap();

        for s in &ranked {
            assert_eq!(s.sub_score("flat"), Some(NEUTRAL_SCORE));
        }
        // C: 0.5*50 + 0.5*100
        assert_eq!(ranked[0].id(), "C");
        assert!((ranked[0].score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_candidate_is_neutral() {
        let candidates = vec![candidate("only", &[("value", 42.0)])];
        let ranked = rank_candidates(&candidates, &single(1.0)).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, NEUTRAL_SCORE);
    }

    #[test]
    fn test_ties_broken_by_id() {
        let candidates = vec![
            candidate("zeta", &[("value", 5.0)]),
            candidate("alpha", &[("value", 5.0)]),
            candidate("mid", &[("value", 5.0)]),
        ];
        let ranked = rank_candidates(&candidates, &single(1.0)).unwrap();
        assert_eq!(ids(&ranked), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_missing_criterion_scores_zero() {
        let candidates = vec![
            candidate("A", &[("a", 10.0), ("b", 1.0)]),
            candidate("B", &[("a", 20.0)]),
        ];
        let weights = ScoringWeights::new().with("a", 0.5).with("b", 0.5);
        let ranked = rank_candidates(&candidates, &weights).unwrap();

        let b = ranked.iter().find(|s| s.id() == "B").unwrap();
        assert_eq!(b.sub_score("b"), Some(0.0));
        assert_eq!(b.components[1].raw, None);
        // A is the only candidate with "b", so it scores neutral there
        let a = ranked.iter().find(|s| s.id() == "A").unwrap();
        assert_eq!(a.sub_score("b"), Some(NEUTRAL_SCORE));
        assert_eq!(a.score, 25.0);
        assert_eq!(b.score, 50.0);
    }

    #[test]
    fn test_unweighted_criteria_ignored() {
        let candidates = vec![
            candidate("A", &[("value", 1.0), ("noise", 1000.0)]),
            candidate("B", &[("value", 2.0), ("noise", -1000.0)]),
        ];
        let ranked = rank_candidates(&candidates, &single(1.0)).unwrap();
        assert_eq!(ids(&ranked), vec!["B", "A"]);
        assert_eq!(ranked[0].components.len(), 1);
        assert!(ranked[0].sub_score("noise").is_none());
    }

    #[test]
    fn test_weights_are_renormalized() {
        let candidates = vec![
            candidate("A", &[("a", 0.0), ("b", 10.0)]),
            candidate("B", &[("a", 10.0), ("b", 0.0)]),
        ];
        let weights = ScoringWeights::new().with("a", 3.0).with("b", 1.0);
        let ranked = rank_candidates(&candidates, &weights).unwrap();
        assert_eq!(ranked[0].id(), "B");
        assert!((ranked[0].score - 75.0).abs() < 1e-9);
        assert!((ranked[1].score - 25.0).abs() < 1e-9);

        let scorer = HubScorer::new(&weights).unwrap();
        let total: f64 = scorer.weights().iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_contributions_sum_to_score() {
        let candidates = vec![
            candidate("A", &[("a", 1.0), ("b", 4.0)]),
            candidate("B", &[("a", 3.0), ("b", 2.0)]),
            candidate("C", &[("a", 2.0), ("b", 9.0)]),
        ];
        let weights = ScoringWeights::new().with("a", 0.6).with("b", 0.4);
        let ranked = rank_candidates(&candidates, &weights).unwrap();
        for s in &ranked {
            let sum: f64 = s.components.iter().map(|c| c.contribution).sum();
            assert!((sum - s.score).abs() < 1e-9);
        }
    }

    #[test]
    fn test_extreme_values_stay_in_range() {
        let candidates = vec![
            candidate("A", &[("value", -1e308)]),
            candidate("B", &[("value", 0.0)]),
            candidate("C", &[("value", 1e308)]),
        ];
        let ranked = rank_candidates(&candidates, &single(1.0)).unwrap();

        assert_eq!(ids(&ranked), vec!["C", "B", "A"]);
        assert_eq!(ranked[0].score, 100.0);
        assert_eq!(ranked[1].score, 50.0);
        assert_eq!(ranked[2].score, 0.0);
    }

    #[test]
    fn test_huge_weights_are_accepted() {
        let candidates = vec![
            candidate("A", &[("a", 0.0), ("b", 10.0)]),
            candidate("B", &[("a", 10.0), ("b", 0.0)]),
        ];
        let weights = ScoringWeights::new().with("a", 1e308).with("b", 1e308);
        let scorer = HubScorer::new(&weights).unwrap();
        assert_eq!(scorer.weights()[0].1, 0.5);
        assert_eq!(scorer.weights()[1].1, 0.5);

        let ranked = scorer.rank(&candidates).unwrap();
        assert_eq!(ranked[0].score, 50.0);
        assert_eq!(ids(&ranked), vec!["A", "B"]);
    }

    #[test]
    fn test_negative_weight_is_configuration_error() {
        let candidates = vec![candidate("A", &[("value", 1.0)])];
        let err = rank_candidates(&candidates, &single(-1.0)).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("weights.value"));
    }

    #[test]
    fn test_all_zero_weights_is_configuration_error() {
        let err = HubScorer::new(&single(0.0)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_candidates_is_input_error() {
        let err = rank_candidates(&[], &single(1.0)).unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_configuration_checked_before_input() {
        let err = rank_candidates(&[], &single(-1.0)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_duplicate_id_is_input_error() {
        let candidates = vec![
            candidate("A", &[("value", 1.0)]),
            candidate("A", &[("value", 2.0)]),
        ];
        let err = rank_candidates(&candidates, &single(1.0)).unwrap_err();
        assert!(err.is_input());
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_non_finite_value_is_input_error() {
        let candidates = vec![candidate("A", &[("value", f64::NAN)])];
        let err = rank_candidates(&candidates, &single(1.0)).unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_non_finite_coordinates_is_input_error() {
        let candidates = vec![CandidateLocation::new("A", Coordinates::new(f64::NAN, -6.2))];
        let err = rank_candidates(&candidates, &single(1.0)).unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_input_not_modified() {
        let candidates = vec![
            candidate("B", &[("value", 1.0)]),
            candidate("A", &[("value", 2.0)]),
        ];
        let before = candidates.clone();
        let _ = rank_candidates(&candidates, &single(1.0)).unwrap();
        assert_eq!(candidates, before);
    }
}
