//! Normalization of raw model output into the structured reply contract.
//!
//! The model is asked for `{"return_message", "is_finished", "data"}` but is
//! free to emit anything. [`parse_reply`] makes exactly one parse attempt and
//! falls back to treating the text as a plain question; it never fails.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extracted surf-travel profile (`destinations`, `travel_style`, `surf_pref`, `extras`).
///
/// Kept as an open JSON object so the reply echoes exactly what the model produced.
pub type ProfileData = Map<String, Value>;

/// Reply returned to callers for every turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredReply {
    /// Text to show the user.
    pub return_message: String,
    /// Whether all slots have been collected.
    pub is_finished: bool,
    /// Collected profile; always `None` while `is_finished` is false.
    pub data: Option<ProfileData>,
}

impl StructuredReply {
    /// Reply carrying only a message, conversation still open.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            return_message: text.into(),
            is_finished: false,
            data: None,
        }
    }
}

/// Outcome of interpreting a model completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedReply {
    /// Completion was a JSON object.
    Structured(StructuredReply),
    /// Completion was not a JSON object; carries the untouched text.
    Raw(String),
}

impl ParsedReply {
    /// Whether the completion had to be downgraded to plain text.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Collapse into the external contract.
    #[must_use]
    pub fn into_reply(self) -> StructuredReply {
        match self {
            Self::Structured(reply) => reply,
            Self::Raw(text) => StructuredReply::plain(text),
        }
    }
}

/// Interpret a raw completion.
///
/// Missing or mistyped fields take their defaults: `return_message` falls back
/// to the raw text, `is_finished` to `false`. `data` is only kept when it is an
/// object and the conversation is finished.
#[must_use]
pub fn parse_reply(raw: &str) -> ParsedReply {
    let candidate = strip_code_fence(raw.trim());
    let Ok(Value::Object(mut object)) = serde_json::from_str::<Value>(candidate) else {
        return ParsedReply::Raw(raw.to_string());
    };

    let return_message = match object.remove("return_message") {
        Some(Value::String(text)) => text,
        _ => raw.to_string(),
    };
    let is_finished = object
        .get("is_finished")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let data = match object.remove("data") {
        Some(Value::Object(map)) if is_finished => Some(map),
        _ => None,
    };

    ParsedReply::Structured(StructuredReply {
        return_message,
        is_finished,
        data,
    })
}

/// Remove a surrounding Markdown code fence, with or without a language tag.
fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return text;
    };

    match inner.split_once('\n') {
        Some((tag, body)) if !tag.trim_start().starts_with('{') => body.trim(),
        _ => inner.trim(),
    }
}
