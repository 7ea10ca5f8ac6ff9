// File: src/conversation/ids.rs

//! Identifier type for chat sessions.
//!
//! A [`ChatId`] is an opaque random UUID (v4). It is handed to clients on the
//! first turn and echoed back on every follow-up, so it must never leak
//! anything about creation time or ordering.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one slot-filling chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct ChatId(pub Uuid);

impl Default for ChatId {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ChatId {
    /// Allocate a fresh random identifier.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatId {
    type Err = uuid::Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
