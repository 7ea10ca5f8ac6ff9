//! HTTP route handlers for the Swellyo chat API.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::conversation::{ChatId, NewChat, ProfileData, StructuredReply, Turn};

use super::error::ApiError;
use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/new_chat", post(new_chat))
        .route("/chats/{chat_id}", get(chat_history))
        .route("/chats/{chat_id}/continue", post(continue_chat))
        .with_state(state)
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"`.
    pub status: String,
    /// Human-readable note.
    pub message: String,
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Swellyo API is running".to_string(),
    })
}

/// Body of `POST /new_chat` and `POST /chats/{chat_id}/continue`.
///
/// A body that fails to deserialize is answered with `{"detail": ...}` like every other error.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageRequest {
    /// The user's message.
    pub message: String,
}

/// Response of `POST /new_chat`.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewChatResponse {
    /// Identifier for follow-up turns.
    pub chat_id: ChatId,
    /// Text to show the user.
    pub return_message: String,
    /// Whether all slots have been collected.
    pub is_finished: bool,
    /// Collected profile, null while unfinished.
    pub data: Option<ProfileData>,
}

impl From<NewChat> for NewChatResponse {
    fn from(opened: NewChat) -> Self {
        Self {
            chat_id: opened.chat_id,
            return_message: opened.reply.return_message,
            is_finished: opened.reply.is_finished,
            data: opened.reply.data,
        }
    }
}

/// Response of `GET /chats/{chat_id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Chat identifier.
    pub chat_id: ChatId,
    /// Full ordered history, meta-prompt first.
    pub messages: Vec<Turn>,
}

/// Open a chat.
async fn new_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Json<NewChatResponse>, ApiError> {
    let Json(request) = payload?;
    let opened = state.chats.new_chat(&request.message).await?;
    Ok(Json(opened.into()))
}

/// Add a message to an existing chat.
async fn continue_chat(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
    payload: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Json<StructuredReply>, ApiError> {
    let chat_id = parse_chat_id(&chat_id)?;
    let Json(request) = payload?;
    let reply = state.chats.continue_chat(chat_id, &request.message).await?;
    Ok(Json(reply))
}

/// Return the stored history of a chat.
async fn chat_history(
    State(state): State<Arc<AppState>>,
    Path(chat_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let chat_id = parse_chat_id(&chat_id)?;
    let messages = state.chats.history(chat_id).await?;
    Ok(Json(HistoryResponse { chat_id, messages }))
}

/// A path segment that is not a UUID cannot name a chat.
fn parse_chat_id(raw: &str) -> Result<ChatId, ApiError> {
    raw.parse().map_err(|_| ApiError::chat_not_found())
}
