pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::relevance::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Job descriptions
        .route("/api/v1/jd", post(handlers::handle_submit_jd))
        .route("/api/v1/jd/extract", post(handlers::handle_extract_preview))
        .route("/api/v1/jd/:id", get(handlers::handle_get_jd))
        .route(
            "/api/v1/jd/:id/evaluations",
            get(handlers::handle_list_jd_evaluations),
        )
        // Evaluation
        .route(
            "/api/v1/evaluate_resume",
            post(handlers::handle_evaluate_resume),
        )
        .route(
            "/api/v1/evaluate_resume/upload",
            post(handlers::handle_evaluate_upload),
        )
        .route(
            "/api/v1/evaluations/:id",
            get(handlers::handle_get_evaluation),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
