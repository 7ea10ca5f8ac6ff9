//! Offline provider that walks through the four profile slots.
//!
//! Used when no provider key is configured. It does not look at content
//! beyond counting user turns: the first user message gets the first question,
//! each following message answers the previous question, and once all four
//! answers are in the reply is finished with the answers echoed as `data`.

use serde_json::{Value, json};

use super::{ChatFuture, ChatModel, CompletionRequest, LlmResult};
use crate::conversation::turn::Role;

/// Slot names, in the order they are asked for.
const SLOTS: [&str; 4] = ["destinations", "travel_style", "surf_pref", "extras"];

const QUESTIONS: [&str; 4] = [
    "Yo dude! Which 2-3 surf zones do you know inside-out? Towns or areas you've surfed enough to call your stomping grounds.",
    "Solid, bro. What's your usual travel style? Budget or mid/high spender, solo or with a crew, any remote work in the mix?",
    "Got it. Now wave-wise, what's your sweet spot? Size, reef vs sand, crowds, barrels vs mellow peelers?",
    "Hell yeah. Last piece: outside the surf, any must-do's that make a trip feel complete for you?",
];

const CLOSING: &str = "Epic, that paints the full picture 🤙 here's your profile.";

/// Scripted stand-in for a real model.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockChat;

impl MockChat {
    /// Create the mock provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn reply_for(request: &CompletionRequest<'_>) -> String {
        let answers: Vec<&str> = request
            .messages
            .iter()
            .filter(|turn| turn.role == Role::User)
            .map(|turn| turn.content.as_str())
            .skip(1)
            .collect();

        let reply = QUESTIONS.get(answers.len()).map_or_else(
            || {
                let data: serde_json::Map<String, Value> = SLOTS
                    .iter()
                    .zip(&answers)
                    .map(|(slot, answer)| ((*slot).to_string(), Value::from(*answer)))
                    .collect();
                json!({ "return_message": CLOSING, "is_finished": true, "data": data })
            },
            |question| json!({ "return_message": question, "is_finished": false, "data": null }),
        );
        reply.to_string()
    }
}

impl ChatModel for MockChat {
    fn complete<'a>(&'a self, request: CompletionRequest<'a>) -> ChatFuture<'a, LlmResult<String>> {
        let reply: LlmResult<String> = Ok(Self::reply_for(&request));
        Box::pin(async move { reply })
    }

    fn provider(&self) -> &'static str {
        "mock"
    }
}
