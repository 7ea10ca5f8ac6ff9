//! Conversation sessions for the slot-filling surf-profile dialogue.
//!
//! - `ids`: chat session identifiers
//! - `turn`: role-tagged history entries
//! - `meta_prompt`: the fixed system instruction
//! - `reply`: parse-then-fallback normalization of model output
//! - `store`: in-memory session store with per-session locking
//! - `service`: turn handler tying store and model together
//! - `errors`: chat error taxonomy

pub mod errors;
pub mod ids;
pub mod meta_prompt;
pub mod reply;
pub mod service;
pub mod store;
pub mod turn;

pub use errors::{ChatError, ChatResult};
pub use ids::ChatId;
pub use meta_prompt::META_PROMPT;
pub use reply::{ParsedReply, ProfileData, StructuredReply, parse_reply};
pub use service::{ChatService, NewChat, TurnOptions};
pub use store::{Session, SessionGuard, SessionStore};
pub use turn::{Role, Turn};
