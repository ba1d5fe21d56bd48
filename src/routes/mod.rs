// src/routes/mod.rs
pub mod chat;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    routing::{get, post},
};
use chat::{chat_handler, status_handler};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(static_dir: impl AsRef<Path>) -> Router<SharedState> {
    // Unknown methods answer 404 like unknown paths.
    let api_routes = Router::new()
        .route("/chat", post(chat_handler).fallback(not_found))
        .route("/status", get(status_handler).fallback(not_found));

    let static_files = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
