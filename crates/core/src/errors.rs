//! Core error types for the dividend query service.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the query service.
///
/// Upstream failures arrive here already flattened to "no data" by the
/// provider; the variants below only say which operation went without.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Search could not be performed. Distinct from "no matches".
    #[error("Search unavailable: {0}")]
    SearchUnavailable(String),

    /// The bulk listing could not be fetched.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A single upstream item could not be shaped. Callers skip the item.
    #[error("Partial data: {0}")]
    PartialData(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Caller-supplied input that can't be served.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts_into_error() {
        let err: Error = ValidationError::MissingField("symbol".to_string()).into();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Input validation failed: Required field 'symbol' is missing"
        );
    }
}
