//! Failures of a model call

use std::time::Duration;
use thiserror::Error;

/// Why a model call produced no usable answer
///
/// The HTTP layer reports these as a 500 with the display text in `detail`,
/// so messages are written for the person reading that response.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No access token could be obtained
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// Non-success status without a structured error body, or a transport failure (status 0)
    #[error("HTTP error (status {status}): {body}")]
    HttpError { status: u16, body: String },

    /// The response body broke off or was not valid UTF-8
    #[error("Stream error: {0}")]
    StreamError(String),

    /// An event payload did not match the expected schema
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Rate limit exceeded (retry after {retry_after:?})")]
    RateLimitExceeded { retry_after: Option<Duration> },

    /// Structured error reported by the model endpoint, before or during streaming
    #[error("Provider error ({code}): {message}")]
    ProviderError { code: String, message: String },

    #[error("Model returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::HttpError {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            body: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_upstream_detail() {
        let err = LlmError::HttpError {
            status: 503,
            body: "upstream unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error (status 503): upstream unavailable");

        let err = LlmError::ProviderError {
            code: "overloaded_error".to_string(),
            message: "Overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "Provider error (overloaded_error): Overloaded");
    }

    #[test]
    fn test_rate_limit_mentions_retry_delay() {
        let err = LlmError::RateLimitExceeded {
            retry_after: Some(Duration::from_secs(30)),
        };
        assert!(err.to_string().contains("30s"));
    }
}
