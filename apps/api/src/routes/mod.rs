pub mod health;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::history::handlers as history;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/analyses",
            get(history::handle_history).post(analysis::handle_analyze),
        )
        .route("/api/v1/analyses/latest", get(history::handle_latest))
        .route("/api/v1/analyses/:id", get(history::handle_get_analysis))
        .route(
            "/api/v1/analyses/:id/confidence",
            patch(history::handle_set_confidence),
        )
        .with_state(state)
}
