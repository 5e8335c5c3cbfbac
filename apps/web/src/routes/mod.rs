pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_index))
        .route("/evaluate", post(handlers::handle_evaluate))
        .route("/suggestions", post(handlers::handle_seek_suggestions))
        .route("/result", get(handlers::handle_result))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
