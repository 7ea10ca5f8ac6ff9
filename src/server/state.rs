//! Application state shared across all request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::conversation::ChatService;
use crate::llm::{ChatModel, MockChat, OpenAiChat};

/// Shared application state.
pub struct AppState {
    /// Turn handler owning every chat session.
    pub chats: ChatService,
}

impl AppState {
    /// Create a new application state with the provider selected by `config`.
    ///
    /// # Errors
    /// Returns an error if the provider client cannot be created.
    pub fn new(config: &ServiceConfig) -> Result<Arc<Self>, Box<dyn std::error::Error + Send + Sync>> {
        let model: Arc<dyn ChatModel> = match config.api_key.as_deref() {
            Some(key) if !config.uses_mock() => Arc::new(
                OpenAiChat::new(
                    key,
                    &config.base_url,
                    Duration::from_secs(config.request_timeout_secs),
                )
                .map_err(|e| format!("Failed to create provider client: {e}"))?,
            ),
            _ => {
                tracing::warn!("No provider key configured or mock forced, serving scripted replies");
                Arc::new(MockChat::new())
            }
        };

        Ok(Self::with_model(model, config))
    }

    /// Create a state around an explicit model implementation.
    #[must_use]
    pub fn with_model(model: Arc<dyn ChatModel>, config: &ServiceConfig) -> Arc<Self> {
        Arc::new(Self {
            chats: ChatService::new(model, config),
        })
    }
}
