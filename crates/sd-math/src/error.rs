//! Error type for the typed distribution API.
//!
//! The free functions never fail: out-of-domain input yields NaN. Only the
//! validating constructors and the catalog lookup return these errors.

use thiserror::Error;

/// Result alias for fallible distribution construction.
pub type Result<T> = std::result::Result<T, DistError>;

/// Errors raised when building a distribution object.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistError {
    /// Parameters are outside the distribution's domain.
    #[error("invalid parameters for {distribution}: {reason}")]
    InvalidParameters {
        distribution: &'static str,
        reason: String,
    },

    /// Name not present in the catalog.
    #[error("unknown distribution: {0}")]
    UnknownDistribution(String),

    /// Wrong number of positional parameters for a catalog entry.
    #[error("{distribution} takes {expected} parameter(s), got {got}")]
    ParameterCount {
        distribution: &'static str,
        expected: usize,
        got: usize,
    },
}

impl DistError {
    pub(crate) fn invalid(distribution: &'static str, reason: impl Into<String>) -> Self {
        DistError::InvalidParameters {
            distribution,
            reason: reason.into(),
        }
    }
}
