//! Error types for chat sessions.

use thiserror::Error;

use crate::conversation::ids::ChatId;
use crate::llm::LlmError;

/// Failures surfaced by the session store and turn handler.
#[derive(Debug, Error)]
pub enum ChatError {
    /// No session is registered under this identifier.
    #[error("chat not found: {0}")]
    NotFound(ChatId),
    /// The model provider call failed.
    #[error("model call failed: {0}")]
    Upstream(#[from] LlmError),
}

/// Convenience result alias for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;
