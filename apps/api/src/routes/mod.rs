pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::agent::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document API
        .route(
            "/api/v1/documents/resume",
            post(handlers::handle_optimize_resume),
        )
        .route(
            "/api/v1/documents/cover-letter",
            post(handlers::handle_generate_cover_letter),
        )
        .route(
            "/api/v1/documents/ksc",
            post(handlers::handle_generate_ksc_responses),
        )
        .with_state(state)
}
