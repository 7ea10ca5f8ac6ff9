//! Turn handler: relays a session's history to the model and normalizes the answer.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::config::{ServiceConfig, TurnConfig};
use crate::conversation::errors::ChatResult;
use crate::conversation::ids::ChatId;
use crate::conversation::meta_prompt::META_PROMPT;
use crate::conversation::reply::{StructuredReply, parse_reply};
use crate::conversation::store::SessionStore;
use crate::conversation::turn::Turn;
use crate::llm::{ChatModel, CompletionRequest, LlmError};

/// Sampling options applied to one kind of turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnOptions {
    /// Provider model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Constrain output to a JSON object.
    pub json_object: bool,
}

impl TurnOptions {
    fn from_config(turn: &TurnConfig, config: &ServiceConfig) -> Self {
        Self {
            model: turn.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            json_object: turn.json_object,
        }
    }

    fn request<'a>(&'a self, messages: &'a [Turn]) -> CompletionRequest<'a> {
        CompletionRequest {
            model: self.model.as_str(),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            json_object: self.json_object,
        }
    }
}

/// Result of opening a chat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewChat {
    /// Identifier to use for follow-up turns.
    pub chat_id: ChatId,
    /// Normalized first reply.
    pub reply: StructuredReply,
}

/// Owns the session store and drives every turn through the model.
pub struct ChatService {
    store: SessionStore,
    model: Arc<dyn ChatModel>,
    first_turn: TurnOptions,
    follow_up: TurnOptions,
}

impl ChatService {
    /// Build a service from configuration.
    #[must_use]
    pub fn new(model: Arc<dyn ChatModel>, config: &ServiceConfig) -> Self {
        Self::with_options(
            model,
            TurnOptions::from_config(&config.new_chat, config),
            TurnOptions::from_config(&config.continue_chat, config),
        )
    }

    /// Build a service with explicit per-turn options.
    #[must_use]
    pub fn with_options(
        model: Arc<dyn ChatModel>,
        first_turn: TurnOptions,
        follow_up: TurnOptions,
    ) -> Self {
        Self {
            store: SessionStore::new(),
            model,
            first_turn,
            follow_up,
        }
    }

    /// Underlying session store.
    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Name of the provider answering turns.
    #[must_use]
    pub fn provider(&self) -> &'static str {
        self.model.provider()
    }

    /// Open a chat: seed it with the meta-prompt and the user's message, ask the model.
    ///
    /// The session is only registered once the model has answered, so a failed
    /// provider call leaves no trace in the store.
    ///
    /// # Errors
    /// Returns [`crate::conversation::ChatError::Upstream`] if the model call fails.
    pub async fn new_chat(&self, message: &str) -> ChatResult<NewChat> {
        let mut turns = vec![Turn::system(META_PROMPT), Turn::user(message)];

        let raw = self
            .model
            .complete(self.first_turn.request(&turns))
            .await
            .inspect_err(|err| log_upstream_failure(None, err))?;

        let reply = interpret(&raw);
        turns.push(Turn::assistant(raw));
        let chat_id = self.store.create(turns);
        self.store.lock(chat_id).await?.set_finished(reply.is_finished);

        debug!(%chat_id, finished = reply.is_finished, "Opened chat");
        Ok(NewChat { chat_id, reply })
    }

    /// Add a user message to an existing chat and ask the model again.
    ///
    /// The session stays locked for the whole turn. Messages sent after the
    /// chat finished are still relayed.
    ///
    /// # Errors
    /// Returns [`crate::conversation::ChatError::NotFound`] for an unknown id and
    /// [`crate::conversation::ChatError::Upstream`] if the model call fails, in
    /// which case the user message is removed again.
    pub async fn continue_chat(&self, chat_id: ChatId, message: &str) -> ChatResult<StructuredReply> {
        let mut session = self.store.lock(chat_id).await?;
        if session.is_finished() {
            debug!(%chat_id, "Continuing a chat that already finished");
        }

        session.push(Turn::user(message));
        let outcome = self
            .model
            .complete(self.follow_up.request(session.turns()))
            .await;

        let raw = match outcome {
            Ok(raw) => raw,
            Err(err) => {
                session.pop();
                log_upstream_failure(Some(chat_id), &err);
                return Err(err.into());
            }
        };

        let reply = interpret(&raw);
        session.push(Turn::assistant(raw));
        session.set_finished(reply.is_finished);

        debug!(
            %chat_id,
            turns = session.turns().len(),
            finished = reply.is_finished,
            "Continued chat"
        );
        Ok(reply)
    }

    /// Full ordered history of a chat.
    ///
    /// # Errors
    /// Returns [`crate::conversation::ChatError::NotFound`] for an unknown id.
    pub async fn history(&self, chat_id: ChatId) -> ChatResult<Vec<Turn>> {
        self.store.get(chat_id).await
    }
}

fn interpret(raw: &str) -> StructuredReply {
    let parsed = parse_reply(raw);
    if parsed.is_raw() {
        warn!("Model reply was not a JSON object, returning it as plain text");
    }
    parsed.into_reply()
}

fn log_upstream_failure(chat_id: Option<ChatId>, err: &LlmError) {
    match chat_id {
        Some(id) => error!(chat_id = %id, retryable = err.is_retryable(), "Model call failed: {err}"),
        None => error!(retryable = err.is_retryable(), "Model call failed: {err}"),
    }
}
