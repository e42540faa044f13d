use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_size as usize;

    Router::new()
        // Files
        .route(
            "/file",
            post(handlers::upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/files",
            post(handlers::upload_files).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/file/:identifier", get(handlers::get_file))
        .route("/file/:identifier", delete(handlers::delete_file))
        // Papers
        .route("/papers", get(handlers::list_papers))
        .route(
            "/papers",
            post(handlers::upload_paper).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/papers/file/:id", get(handlers::get_paper_file))
        // Internal
        .route("/_internal/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
