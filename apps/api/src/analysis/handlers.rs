use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use crate::analysis::{jd_length_warning, run_full_analysis};
use crate::errors::AppError;
use crate::history::repair::AnalysisView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub jd_text: String,
}

/// POST /api/v1/analyses
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<(StatusCode, Json<AnalysisView>), AppError> {
    if req.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jdText must not be empty".to_string()));
    }

    let raw = run_full_analysis(&state.heuristics, &req.company, &req.role, &req.jd_text);
    let entry = state
        .history
        .save_analysis(raw.into_record())
        .await
        .ok_or_else(|| AppError::StoreUnavailable("analysis could not be saved".to_string()))?;
    info!(id = %entry.id, base_score = entry.base_score, "Analysis created");

    let view = AnalysisView::new(entry, &state.heuristics.company)
        .with_warning(jd_length_warning(&req.jd_text));
    Ok((StatusCode::CREATED, Json(view)))
}
