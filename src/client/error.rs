//! Suggestion service error types

use std::time::Duration;

use thiserror::Error;

/// Errors from one suggestion call
///
/// The client never retries; whether a failure blocks the flow is the
/// wizard's decision, made per step.
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("response missing required field: {0}")]
    InvalidShape(String),

    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl SuggestionError {
    /// True for timeouts, which the fallback policy treats like any other
    /// server error for the step.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SuggestionError::Timeout(_))
    }

    /// True when a 2xx response had the wrong shape; reported as a server
    /// error, never as a successful empty result.
    pub fn is_invalid_shape(&self) -> bool {
        matches!(self, SuggestionError::InvalidShape(_))
    }

    /// Short label used in user-facing failure notices
    pub fn kind(&self) -> &'static str {
        match self {
            SuggestionError::Timeout(_) => "timeout",
            SuggestionError::Network(_) => "network",
            SuggestionError::Api { .. } => "server",
            SuggestionError::InvalidShape(_) | SuggestionError::Json(_) => "invalid-shape",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_classification() {
        let err = SuggestionError::Timeout(Duration::from_secs(20));
        assert!(err.is_timeout());
        assert_eq!(err.kind(), "timeout");
    }

    #[test]
    fn test_invalid_shape_is_server_class() {
        let err = SuggestionError::InvalidShape("itinerary".to_string());
        assert!(err.is_invalid_shape());
        assert_eq!(err.kind(), "invalid-shape");

        let err = SuggestionError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.kind(), "server");
    }
}
