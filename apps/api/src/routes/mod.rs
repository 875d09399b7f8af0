pub mod health;
pub mod practice;

use axum::{
    routing::{get, put},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/catalog", get(handlers::handle_catalog))
        // Analyses
        .route(
            "/api/v1/analyses",
            get(handlers::handle_list_analyses).post(handlers::handle_create_analysis),
        )
        .route("/api/v1/results", get(handlers::handle_results))
        .route(
            "/api/v1/analyses/:id/confidence",
            put(handlers::handle_set_confidence),
        )
        .route(
            "/api/v1/analyses/:id/export/:kind",
            get(handlers::handle_export),
        )
        // Practice progress
        .route("/api/v1/practice", get(practice::handle_get_practice))
        .route("/api/v1/practice/:index", put(practice::handle_set_practice))
        .with_state(state)
}
