//! Model provider capability.
//!
//! The service treats the provider as opaque: given an ordered list of
//! role/content turns and sampling options, return the completion text.
//! - `openai_chat`: OpenAI-compatible `chat/completions` client
//! - `mock_chat`: offline scripted provider for demos and local runs

pub mod errors;
pub mod mock_chat;
pub mod openai_chat;

pub use errors::{LlmError, LlmResult};
pub use mock_chat::MockChat;
pub use openai_chat::OpenAiChat;

use std::future::Future;
use std::pin::Pin;

use crate::conversation::turn::Turn;

/// Boxed future type for provider calls.
pub type ChatFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Parameters of one completion call.
#[derive(Clone, Copy, Debug)]
pub struct CompletionRequest<'a> {
    /// Provider model identifier.
    pub model: &'a str,
    /// Full conversation so far, oldest first.
    pub messages: &'a [Turn],
    /// Sampling temperature.
    pub temperature: f64,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Constrain the output to a single JSON object.
    pub json_object: bool,
}

/// Trait abstraction over chat completion providers.
pub trait ChatModel: Send + Sync {
    /// Request a completion for the given conversation.
    ///
    /// # Errors
    /// Returns an error if the provider call fails or yields no text.
    fn complete<'a>(&'a self, request: CompletionRequest<'a>) -> ChatFuture<'a, LlmResult<String>>;

    /// Short provider name for logs.
    fn provider(&self) -> &'static str;
}
