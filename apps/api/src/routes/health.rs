use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

/// GET /health
/// Returns service status, version and whether the history store answers.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let store = match state.history.store().ping().await {
        Ok(_) => "ok",
        Err(e) => {
            warn!("History store ping failed: {e}");
            "unavailable"
        }
    };
    Json(json!({
        "status": if store == "ok" { "ok" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "heuristicsVersion": state.heuristics.version,
        "store": store
    }))
}
