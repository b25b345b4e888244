//! Router assembly: HTTP endpoints, WebSocket upgrade, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - CORS (allow any origin/method/headers), adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/session", post(http::http_post_session))
        .route("/api/v1/exercise", get(http::http_get_exercise))
        .route("/api/v1/exercise/new", post(http::http_post_new_exercise))
        .route("/api/v1/answer", post(http::http_post_answer))
        .route("/api/v1/recap", get(http::http_get_recap))
        .route("/api/v1/recap/new", post(http::http_post_new_recap))
        .route("/api/v1/recap/answer", post(http::http_post_recap_answer))
        .route("/api/v1/plane", post(http::http_post_plane))
        .route("/api/v1/lesson", get(http::http_get_lesson))
        .route("/api/v1/lesson.tex", get(http::http_get_lesson_tex))
        .route("/api/v1/lesson.txt", get(http::http_get_lesson_txt))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
