//! Async client for OpenAI-compatible chat completion APIs.
//!
//! Behaviour:
//! - `POST {base_url}/chat/completions` with bearer auth.
//! - The whole session history is sent on every call.
//! - When JSON output is requested, `response_format` is set to `json_object`.
//! - The first choice's message content is returned verbatim.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatFuture, ChatModel, CompletionRequest, LlmError, LlmResult};
use crate::conversation::turn::Turn;

/// Default provider base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [Turn],
    temperature: f64,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

impl<'a> ChatCompletionBody<'a> {
    fn from_request(request: CompletionRequest<'a>) -> Self {
        Self {
            model: request.model,
            messages: request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request
                .json_object
                .then_some(ResponseFormat { kind: "json_object" }),
        }
    }
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn into_content(self) -> LlmResult<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyCompletion)
    }
}

/// Chat completion client bound to one provider account.
pub struct OpenAiChat {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiChat {
    /// Create a client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        request_timeout: Duration,
    ) -> LlmResult<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()
            .map_err(|e| LlmError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Full URL of the completions endpoint.
    #[must_use]
    pub fn completions_url(&self) -> String {
        if self.base_url.ends_with("/chat/completions") {
            self.base_url.clone()
        } else {
            format!("{}/chat/completions", self.base_url)
        }
    }

    async fn post_completion(&self, request: CompletionRequest<'_>) -> LlmResult<String> {
        let body = ChatCompletionBody::from_request(request);
        debug!(
            "Requesting completion from {} with {} messages",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LlmError::HttpStatusNotOk {
                status: status.as_u16(),
                body: detail,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice::<ChatCompletionResponse>(&bytes)?.into_content()
    }
}

impl ChatModel for OpenAiChat {
    fn complete<'a>(&'a self, request: CompletionRequest<'a>) -> ChatFuture<'a, LlmResult<String>> {
        Box::pin(self.post_completion(request))
    }

    fn provider(&self) -> &'static str {
        "openai"
    }
}
