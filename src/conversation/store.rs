//! In-memory session store.
//!
//! Sessions live for the lifetime of the process: no eviction, no capacity
//! bound, no persistence. Each session sits behind its own async mutex so a
//! full turn (user append, model call, reply append) can be serialized per
//! chat id while unrelated chats proceed concurrently.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::conversation::errors::{ChatError, ChatResult};
use crate::conversation::ids::ChatId;
use crate::conversation::turn::Turn;

/// One conversation and its ordered history.
#[derive(Clone, Debug)]
pub struct Session {
    id: ChatId,
    turns: Vec<Turn>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    finished: bool,
}

impl Session {
    fn new(id: ChatId, turns: Vec<Turn>) -> Self {
        let now = Utc::now();
        Self {
            id,
            turns,
            created_at: now,
            updated_at: now,
            finished: false,
        }
    }

    /// Session identifier.
    #[must_use]
    pub const fn id(&self) -> ChatId {
        self.id
    }

    /// Ordered history, exactly as sent to the model.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last append.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the latest reply declared the conversation complete.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Append a turn at the end of the history.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.updated_at = Utc::now();
    }

    /// Remove the most recent turn, used to undo a user turn that never got an answer.
    pub fn pop(&mut self) -> Option<Turn> {
        self.turns.pop()
    }

    /// Record the completion flag of the latest reply.
    pub const fn set_finished(&mut self, finished: bool) {
        self.finished = finished;
    }
}

/// Exclusive access to one session for the duration of a turn.
pub type SessionGuard = OwnedMutexGuard<Session>;

/// Thread-safe map from chat id to session.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<ChatId, Arc<Mutex<Session>>>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session seeded with `initial_turns` and return its id.
    pub fn create(&self, initial_turns: Vec<Turn>) -> ChatId {
        loop {
            let id = ChatId::new();
            if let dashmap::mapref::entry::Entry::Vacant(slot) = self.sessions.entry(id) {
                slot.insert(Arc::new(Mutex::new(Session::new(id, initial_turns))));
                return id;
            }
        }
    }

    /// Lock a session for exclusive use.
    ///
    /// # Errors
    /// Returns [`ChatError::NotFound`] if the id is unknown.
    pub async fn lock(&self, id: ChatId) -> ChatResult<SessionGuard> {
        let handle = self
            .sessions
            .get(&id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(ChatError::NotFound(id))?;
        Ok(handle.lock_owned().await)
    }

    /// Append a turn to an existing session.
    ///
    /// # Errors
    /// Returns [`ChatError::NotFound`] if the id is unknown.
    pub async fn append(&self, id: ChatId, turn: Turn) -> ChatResult<()> {
        self.lock(id).await?.push(turn);
        Ok(())
    }

    /// Snapshot the ordered history of a session.
    ///
    /// Takes the same lock as a running turn, so a read issued while the model
    /// is answering waits for that turn and sees its user and assistant turns
    /// together, never a dangling user message.
    ///
    /// # Errors
    /// Returns [`ChatError::NotFound`] if the id is unknown.
    pub async fn get(&self, id: ChatId) -> ChatResult<Vec<Turn>> {
        Ok(self.lock(id).await?.turns().to_vec())
    }

    /// Number of sessions held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
