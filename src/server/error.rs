//! Mapping of chat errors onto HTTP responses.
//!
//! Error bodies use the `{"detail": "..."}` shape clients already expect.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::conversation::ChatError;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub detail: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found - unknown chat.
    NotFound(String),
    /// 500 Internal Server Error - provider call failed.
    Internal(String),
    /// 400/415/422 - request body could not be read as the expected JSON.
    Rejected {
        /// Status chosen by the body extractor.
        status: StatusCode,
        /// Extractor message.
        detail: String,
    },
}

impl ApiError {
    /// Error returned for any chat id that names no session.
    #[must_use]
    pub fn chat_not_found() -> Self {
        Self::NotFound("Chat not found".to_string())
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            Self::NotFound(msg) | Self::Internal(msg) | Self::Rejected { detail: msg, .. } => msg,
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::NotFound(_) => Self::chat_not_found(),
            ChatError::Upstream(e) => Self::Internal(format!("Error processing chat: {e}")),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}
