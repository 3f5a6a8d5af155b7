//! End-to-end tests for the HTTP surface, with a scripted provider standing in
//! for the real language model.

use std::collections::VecDeque;
use std::sync::{ Arc, Mutex };

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{ Request, StatusCode };
use serde_json::{ json, Value };
use tower::ServiceExt;

use itinerary_relay::config::knowledge::KnowledgeBase;
use itinerary_relay::llm::chat::{ ChatClient, CompletionResponse, ProviderError };
use itinerary_relay::models::chat::ChatMessage;
use itinerary_relay::server::api::{ create_router, AppState, GENERIC_ERROR_MESSAGE };
use itinerary_relay::session::ConversationSession;

// =============================================================================
// Helpers
// =============================================================================

enum Scripted {
    Reply(&'static str),
    Fail,
    Panic,
}

struct ScriptedProvider {
    script: Mutex<VecDeque<Scripted>>,
}

impl ScriptedProvider {
    fn new(script: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self { script: Mutex::new(script.into()) })
    }
}

#[async_trait]
impl ChatClient for ScriptedProvider {
    async fn complete(&self, _history: &[ChatMessage]) -> Result<CompletionResponse, ProviderError> {
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Reply(text)) => Ok(CompletionResponse { response: text.to_string() }),
            Some(Scripted::Fail) =>
                Err(ProviderError::Api {
                    status: 403,
                    message: "API key not valid. secret-detail".into(),
                }),
            Some(Scripted::Panic) => panic!("provider exploded"),
            None => Err(ProviderError::EmptyResponse),
        }
    }

    fn get_model(&self) -> String {
        "scripted".into()
    }

    fn get_base_url(&self) -> Option<String> {
        None
    }
}

fn make_state(script: Vec<Scripted>) -> AppState {
    let session = ConversationSession::new(ScriptedProvider::new(script)).into_shared();
    AppState::new(session, KnowledgeBase::empty(), "does-not-exist/index.html")
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn assert_generic_error(resp: axum::response::Response) {
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await, json!({ "error": GENERIC_ERROR_MESSAGE }));
}

// =============================================================================
// POST /chat
// =============================================================================

#[tokio::test]
async fn chat_returns_itinerary_from_fenced_reply() {
    let app = create_router(
        make_state(
            vec![
                Scripted::Reply(
                    "  Sure! Here is your plan:\n```json\n{\"title\":\"Trip\",\"days\":[]}\n```"
                )
            ]
        )
    );

    let resp = app.oneshot(post_json("/chat", r#"{"message": "3 days in KK"}"#)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({ "type": "itinerary", "data": { "title": "Trip", "days": [] } })
    );
}

#[tokio::test]
async fn chat_returns_plain_text() {
    let app = create_router(make_state(vec![Scripted::Reply("What dates are you traveling?")]));

    let resp = app.oneshot(post_json("/chat", r#"{"message": "Hi"}"#)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "type": "text", "data": "What dates are you traveling?" }));
}

#[tokio::test]
async fn chat_malformed_payload_falls_back_to_original_text() {
    let raw = "{\"title\": \"Trip\", \"days\": [}";
    let app = create_router(make_state(vec![Scripted::Reply(raw)]));

    let resp = app.oneshot(post_json("/chat", r#"{"message": "plan it"}"#)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "type": "text", "data": raw }));
}

#[tokio::test]
async fn chat_missing_message_is_generic_error() {
    let state = make_state(vec![Scripted::Reply("unused")]);
    let app = create_router(state.clone());

    let resp = app.oneshot(post_json("/chat", r#"{"text": "Hi"}"#)).await.unwrap();

    assert_generic_error(resp).await;
    assert!(state.session.lock().await.is_empty());
}

#[tokio::test]
async fn chat_non_string_message_is_generic_error() {
    let app = create_router(make_state(vec![Scripted::Reply("unused")]));

    let resp = app.oneshot(post_json("/chat", r#"{"message": 42}"#)).await.unwrap();

    assert_generic_error(resp).await;
}

#[tokio::test]
async fn chat_invalid_json_body_is_generic_error() {
    let app = create_router(make_state(vec![Scripted::Reply("unused")]));

    let resp = app.oneshot(post_json("/chat", "message=Hi")).await.unwrap();

    assert_generic_error(resp).await;
}

#[tokio::test]
async fn chat_provider_failure_does_not_leak_detail() {
    let app = create_router(make_state(vec![Scripted::Fail]));

    let resp = app.oneshot(post_json("/chat", r#"{"message": "Hi"}"#)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(!text.contains("secret-detail"));
    assert!(!text.contains("403"));
}

#[tokio::test]
async fn chat_panicking_provider_is_generic_error() {
    let state = make_state(vec![Scripted::Panic, Scripted::Reply("Welcome back")]);
    let app = create_router(state.clone());

    let resp = app.clone().oneshot(post_json("/chat", r#"{"message": "Hi"}"#)).await.unwrap();
    assert_generic_error(resp).await;
    assert!(state.session.lock().await.is_empty());

    let resp = app.oneshot(post_json("/chat", r#"{"message": "Hello?"}"#)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let session = state.session.lock().await;
    let contents: Vec<&str> = session.history().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["Hello?", "Welcome back"]);
}

#[tokio::test]
async fn chat_turns_share_one_session() {
    let state = make_state(
        vec![Scripted::Reply("Hello! How many days?"), Scripted::Reply("{\"title\":\"KK\"}")]
    );
    let app = create_router(state.clone());

    let first = app.clone().oneshot(post_json("/chat", r#"{"message": "Hi"}"#)).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let second = app.oneshot(post_json("/chat", r#"{"message": "3 days in KK"}"#)).await.unwrap();
    assert_eq!(body_json(second).await, json!({ "type": "itinerary", "data": { "title": "KK" } }));

    let session = state.session.lock().await;
    let contents: Vec<&str> = session.history().iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["Hi", "Hello! How many days?", "3 days in KK", "{\"title\":\"KK\"}"]);
}

#[tokio::test]
async fn chat_allows_cross_origin_callers() {
    let app = create_router(make_state(vec![Scripted::Reply("Hi there")]));

    let req = Request::post("/chat")
        .header("content-type", "application/json")
        .header("origin", "http://localhost:3000")
        .body(Body::from(r#"{"message": "Hi"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
}

// =============================================================================
// GET /
// =============================================================================

#[tokio::test]
async fn index_page_is_served_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.html");
    std::fs::write(&index, "<html><body>Sabah-bot</body></html>").unwrap();

    let session = ConversationSession::new(ScriptedProvider::new(Vec::new())).into_shared();
    let app = create_router(AppState::new(session, KnowledgeBase::empty(), &index));

    let resp = app.oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("Sabah-bot"));
}

#[tokio::test]
async fn missing_index_page_is_not_found() {
    let app = create_router(make_state(Vec::new()));

    let resp = app.oneshot(Request::get("/").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
