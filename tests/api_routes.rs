//! Integration tests for the chat API.
//!
//! Each test builds its own router around a scripted model, so sessions never
//! leak between tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use swellyo_agent::config::ServiceConfig;
use swellyo_agent::conversation::META_PROMPT;
use swellyo_agent::llm::{ChatFuture, ChatModel, CompletionRequest, LlmError, LlmResult, MockChat};
use swellyo_agent::server::{AppState, build_app};

// =============================================================================
// Helpers
// =============================================================================

const FIRST_QUESTION: &str = r#"{"return_message": "Yo! Which 2-3 surf zones do you know inside-out?", "is_finished": false, "data": null}"#;

/// Model that replays canned completions in order.
struct Scripted {
    replies: Mutex<VecDeque<LlmResult<String>>>,
}

impl Scripted {
    fn new(replies: Vec<LlmResult<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
        })
    }
}

impl ChatModel for Scripted {
    fn complete<'a>(&'a self, _request: CompletionRequest<'a>) -> ChatFuture<'a, LlmResult<String>> {
        let next = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyCompletion));
        Box::pin(async move { next })
    }

    fn provider(&self) -> &'static str {
        "scripted"
    }
}

fn make_app(replies: Vec<LlmResult<String>>) -> axum::Router {
    build_app(AppState::with_model(
        Scripted::new(replies),
        &ServiceConfig::default(),
    ))
}

fn ok(text: &str) -> LlmResult<String> {
    Ok(text.to_string())
}

fn post_json(uri: &str, json: &Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = make_app(Vec::new());
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["message"].as_str().is_some());
}

// =============================================================================
// New chat
// =============================================================================

#[tokio::test]
async fn test_new_chat_returns_question() {
    let app = make_app(vec![ok(FIRST_QUESTION)]);
    let (status, body) = send(&app, post_json("/new_chat", &json!({"message": "hi"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(uuid::Uuid::parse_str(body["chat_id"].as_str().unwrap()).is_ok());
    assert_eq!(
        body["return_message"],
        "Yo! Which 2-3 surf zones do you know inside-out?"
    );
    assert_eq!(body["is_finished"], false);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_new_chat_ids_are_unique() {
    let app = make_app(vec![ok(FIRST_QUESTION), ok(FIRST_QUESTION)]);
    let (_, first) = send(&app, post_json("/new_chat", &json!({"message": "hi"}))).await;
    let (_, second) = send(&app, post_json("/new_chat", &json!({"message": "hi"}))).await;

    assert_ne!(first["chat_id"], second["chat_id"]);
}

#[tokio::test]
async fn test_new_chat_plain_text_reply_falls_back() {
    let app = make_app(vec![ok("Hey dude, where do you usually surf?")]);
    let (status, body) = send(&app, post_json("/new_chat", &json!({"message": "hi"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["return_message"], "Hey dude, where do you usually surf?");
    assert_eq!(body["is_finished"], false);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_new_chat_upstream_failure_is_500() {
    let app = make_app(vec![Err(LlmError::HttpStatusNotOk {
        status: 401,
        body: "invalid api key".to_string(),
    })]);
    let (status, body) = send(&app, post_json("/new_chat", &json!({"message": "hi"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Error processing chat")
    );
}

#[tokio::test]
async fn test_new_chat_rejects_missing_message() {
    let app = make_app(vec![ok(FIRST_QUESTION)]);
    let (status, body) = send(&app, post_json("/new_chat", &json!({"text": "hi"}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("message"));
}

#[tokio::test]
async fn test_bad_bodies_get_detail_json() {
    let app = make_app(vec![ok(FIRST_QUESTION)]);

    let malformed = Request::post("/new_chat")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = app.clone().oneshot(malformed).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );

    let plain = Request::post("/new_chat")
        .header("content-type", "text/plain")
        .body(Body::from("hi"))
        .unwrap();
    let (status, body) = send(&app, plain).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["detail"].as_str().is_some());
}

#[tokio::test]
async fn test_continue_rejects_missing_message() {
    let app = make_app(vec![ok(FIRST_QUESTION)]);
    let (_, opened) = send(&app, post_json("/new_chat", &json!({"message": "hi"}))).await;
    let chat_id = opened["chat_id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        post_json(&format!("/chats/{chat_id}/continue"), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().is_some());

    let (_, history) = send(&app, get(&format!("/chats/{chat_id}"))).await;
    assert_eq!(history["messages"].as_array().unwrap().len(), 3);
}

// =============================================================================
// History
// =============================================================================

#[tokio::test]
async fn test_history_after_new_chat() {
    let app = make_app(vec![ok(FIRST_QUESTION)]);
    let (_, opened) = send(&app, post_json("/new_chat", &json!({"message": "hi"}))).await;
    let chat_id = opened["chat_id"].as_str().unwrap();

    let (status, body) = send(&app, get(&format!("/chats/{chat_id}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chat_id"], chat_id);
    assert_eq!(
        body["messages"],
        json!([
            {"role": "system", "content": META_PROMPT},
            {"role": "user", "content": "hi"},
            {"role": "assistant", "content": FIRST_QUESTION},
        ])
    );
}

#[tokio::test]
async fn test_history_unknown_chat_is_404() {
    let app = make_app(Vec::new());

    let (status, body) = send(&app, get(&format!("/chats/{}", uuid::Uuid::new_v4()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Chat not found");

    let (status, _) = send(&app, get("/chats/not-a-uuid")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Continue
// =============================================================================

#[tokio::test]
async fn test_continue_returns_follow_up_question() {
    let follow_up = r#"{"return_message": "Solid bro, how long did you stay?", "is_finished": false, "data": null}"#;
    let app = make_app(vec![ok(FIRST_QUESTION), ok(follow_up)]);
    let (_, opened) = send(&app, post_json("/new_chat", &json!({"message": "hi"}))).await;
    let chat_id = opened["chat_id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        post_json(
            &format!("/chats/{chat_id}/continue"),
            &json!({"message": "San Diego"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "return_message": "Solid bro, how long did you stay?",
            "is_finished": false,
            "data": null
        })
    );

    let (_, history) = send(&app, get(&format!("/chats/{chat_id}"))).await;
    let messages = history["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[3], json!({"role": "user", "content": "San Diego"}));
    assert_eq!(messages[4], json!({"role": "assistant", "content": follow_up}));
}

#[tokio::test]
async fn test_continue_finished_echoes_data() {
    let data = json!({
        "destinations": "San Diego (7mo + crew), Sri Lanka, Maldives",
        "travel_style": "budget, solo/1 friend, remote-work + surf",
        "surf_pref": "barrels, big/fast waves, low crowd if possible",
        "extras": "sustainability, volleyball, climbing"
    });
    let finished = json!({
        "return_message": "Epic, that paints the full picture",
        "is_finished": true,
        "data": data
    })
    .to_string();
    let app = make_app(vec![ok(FIRST_QUESTION), ok(&finished)]);
    let (_, opened) = send(&app, post_json("/new_chat", &json!({"message": "hi"}))).await;
    let chat_id = opened["chat_id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        post_json(
            &format!("/chats/{chat_id}/continue"),
            &json!({"message": "climbing and volleyball"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_finished"], true);
    assert_eq!(body["data"], data);
}

#[tokio::test]
async fn test_continue_unknown_chat_is_404() {
    let app = make_app(vec![ok(FIRST_QUESTION)]);
    let uri = format!("/chats/{}/continue", uuid::Uuid::new_v4());

    let (status, body) = send(&app, post_json(&uri, &json!({"message": "hello?"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Chat not found");

    let (status, _) = send(
        &app,
        post_json("/chats/garbage/continue", &json!({"message": "hello?"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_continue_upstream_failure_keeps_history_clean() {
    let app = make_app(vec![ok(FIRST_QUESTION)]);
    let (_, opened) = send(&app, post_json("/new_chat", &json!({"message": "hi"}))).await;
    let chat_id = opened["chat_id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        post_json(
            &format!("/chats/{chat_id}/continue"),
            &json!({"message": "Bali"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (_, history) = send(&app, get(&format!("/chats/{chat_id}"))).await;
    assert_eq!(history["messages"].as_array().unwrap().len(), 3);
}

// =============================================================================
// Mock provider end to end
// =============================================================================

#[tokio::test]
async fn test_mock_provider_completes_profile() {
    let app = build_app(AppState::with_model(
        Arc::new(MockChat::new()),
        &ServiceConfig::default(),
    ));
    let (_, opened) = send(&app, post_json("/new_chat", &json!({"message": "hi"}))).await;
    assert_eq!(opened["is_finished"], false);
    let chat_id = opened["chat_id"].as_str().unwrap().to_string();

    let answers = [
        "San Diego, Sri Lanka",
        "budget, solo",
        "barrels, reef",
        "climbing",
    ];
    let mut last = Value::Null;
    for answer in answers {
        let (status, body) = send(
            &app,
            post_json(
                &format!("/chats/{chat_id}/continue"),
                &json!({"message": answer}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        last = body;
    }

    assert_eq!(last["is_finished"], true);
    assert_eq!(last["data"]["destinations"], "San Diego, Sri Lanka");
    assert_eq!(last["data"]["extras"], "climbing");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = make_app(Vec::new());
    let request = Request::get("/health")
        .header("origin", "http://example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
