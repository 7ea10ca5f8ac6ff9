//! Error types for model provider calls.

use thiserror::Error;

/// Errors produced while requesting a completion.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    HttpStatusNotOk {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// Provider response body was not the expected JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider returned no choice or an empty message.
    #[error("provider returned an empty completion")]
    EmptyCompletion,

    /// Client could not be configured.
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

impl LlmError {
    /// Whether retrying the same request could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::HttpRequest(_) => true,
            Self::HttpStatusNotOk { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Convenience result alias for provider calls.
pub type LlmResult<T> = Result<T, LlmError>;
