use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::analysis::scoring::Confidence;
use crate::errors::AppError;
use crate::history::repair::AnalysisView;
use crate::history::repository::HistoryPage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConfidenceRequest {
    pub skill: String,
    pub confidence: Confidence,
}

/// GET /api/v1/analyses
pub async fn handle_history(State(state): State<AppState>) -> Json<HistoryPage> {
    Json(state.history.history().await)
}

/// GET /api/v1/analyses/latest
pub async fn handle_latest(
    State(state): State<AppState>,
) -> Result<Json<AnalysisView>, AppError> {
    let entry = state
        .history
        .latest()
        .await
        .ok_or_else(|| AppError::NotFound("No saved analyses".to_string()))?;
    Ok(Json(AnalysisView::new(entry, &state.heuristics.company)))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisView>, AppError> {
    let entry = state
        .history
        .get_by_id(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;
    Ok(Json(AnalysisView::new(entry, &state.heuristics.company)))
}

/// PATCH /api/v1/analyses/:id/confidence
pub async fn handle_set_confidence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ConfidenceRequest>,
) -> Result<Json<AnalysisView>, AppError> {
    let entry = state
        .history
        .set_skill_confidence(&id, &req.skill, req.confidence)
        .await?;
    Ok(Json(AnalysisView::new(entry, &state.heuristics.company)))
}
