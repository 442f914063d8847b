//! Error types for the upstream dividend data client.
//!
//! These never leave the provider boundary: [`DividendProvider`] methods log
//! them and hand the caller `None` instead.
//!
//! [`DividendProvider`]: crate::provider::DividendProvider

use thiserror::Error;

/// Errors that can occur while talking to the upstream data source.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with something other than HTTP 200.
    #[error("Unexpected HTTP status from {provider}: {status}")]
    HttpStatus {
        /// The provider that answered
        provider: String,
        /// The status code it answered with
        status: u16,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Malformed payload from {provider}: {message}")]
    MalformedPayload {
        /// The provider that sent the payload
        provider: String,
        /// Decoder error message
        message: String,
    },

    /// The provider refused to issue an anti-forgery token.
    #[error("No anti-forgery token issued by {provider}")]
    MissingToken {
        /// The provider that withheld the token
        provider: String,
    },

    /// The payload decoded, but did not carry any data.
    #[error("No data in response from {provider}")]
    NoData {
        /// The provider that returned the empty payload
        provider: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Map a transport error onto the timeout variant when applicable.
    pub(crate) fn from_transport(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::Network(err)
        }
    }

    pub(crate) fn malformed(provider: &str, err: impl std::fmt::Display) -> Self {
        Self::MalformedPayload {
            provider: provider.to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MarketDataError::Timeout {
            provider: "EXDIVIDEND".to_string(),
        };
        assert_eq!(format!("{}", error), "Timeout: EXDIVIDEND");

        let error = MarketDataError::HttpStatus {
            provider: "EXDIVIDEND".to_string(),
            status: 403,
        };
        assert_eq!(
            format!("{}", error),
            "Unexpected HTTP status from EXDIVIDEND: 403"
        );

        let error = MarketDataError::MissingToken {
            provider: "EXDIVIDEND".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "No anti-forgery token issued by EXDIVIDEND"
        );
    }

    #[test]
    fn test_malformed_helper() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let error = MarketDataError::malformed("EXDIVIDEND", parse_err);
        match error {
            MarketDataError::MalformedPayload { provider, message } => {
                assert_eq!(provider, "EXDIVIDEND");
                assert!(!message.is_empty());
            }
            other => panic!("Expected MalformedPayload, got {:?}", other),
        }
    }
}
