//! Errors reported by the hub scorer.

use thiserror::Error;

/// Failure modes of a scoring run.
///
/// Both kinds are reported synchronously to the caller and never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HubError {
    /// The scoring weights cannot be used (negative, non-finite, empty or all zero).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The candidate set is empty or malformed.
    #[error("Input error: {0}")]
    Input(String),
}

impl HubError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}
