use super::config::ScoringWeights;

/// Validate scoring weights.
/// Returns all validation errors at once (not just the first).
pub fn validate_weights(weights: &ScoringWeights) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if weights.is_empty() {
        errors.push("weights: at least one criterion must be weighted".to_string());
    }

    for (criterion, weight) in weights.iter() {
        if criterion.trim().is_empty() {
            errors.push("weights: criterion name must not be empty".to_string());
        }
        if !weight.is_finite() {
            errors.push(format!("weights.{}: must be a finite number", criterion));
        } else if weight < 0.0 {
            errors.push(format!(
                "weights.{}: must be non-negative (got {})",
                criterion, weight
            ));
        }
    }

    // Only meaningful once the individual weights are sane
    if errors.is_empty() && !weights.is_empty() && weights.total() <= 0.0 {
        errors.push("weights: at least one weight must be greater than zero".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
