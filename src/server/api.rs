use crate::classifier::classify_reply;
use crate::config::knowledge::KnowledgeBase;
use crate::models::chat::{ ChatRequest, ClassifiedReply, ErrorResponse };
use crate::session::{ SessionError, SharedSession };
use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;
use axum::{
    routing::post,
    Router,
    Json,
    extract::{ State, rejection::JsonRejection },
    response::{ IntoResponse, Response },
    http::StatusCode,
};
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{ self, CorsLayer };
use tower_http::services::ServeFile;
use log::{ info, error };

/// The only error text a client ever sees.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Error: {}", self);
        generic_error_response()
    }
}

fn generic_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: GENERIC_ERROR_MESSAGE.to_string() }),
    ).into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!("Handler panicked: {}", detail);
    generic_error_response()
}

#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    pub knowledge: Arc<KnowledgeBase>,
    pub index_path: PathBuf,
}

impl AppState {
    pub fn new(session: SharedSession, knowledge: KnowledgeBase, index_path: impl Into<PathBuf>) -> Self {
        Self {
            session,
            knowledge: Arc::new(knowledge),
            index_path: index_path.into(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    Router::new()
        .route("/chat", post(chat_handler))
        .route_service("/", ServeFile::new(&state.index_path))
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer)
                .layer(CatchPanicLayer::custom(handle_panic))
        )
        .with_state(state)
}

async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ClassifiedReply>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let reply = {
        let mut session = state.session.lock().await;
        session.send(&req.message).await?
    };

    let classified = classify_reply(&reply);
    info!("Replying with {} ({} chars from provider)", classified.kind(), reply.len());
    Ok(Json(classified))
}
