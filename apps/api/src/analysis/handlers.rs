//! Axum route handlers for the Analysis JSON API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::export::{brief_filename, render_brief};
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub filename: String,
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Runs one analysis and returns the normalized result. Independent of the
/// dashboard's view state.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let result = state.analyzer.analyze(&request.query).await?;

    Ok(Json(result))
}

/// GET /api/v1/export
///
/// Plain-text brief for the dashboard's current result, as JSON.
pub async fn handle_export(
    State(state): State<AppState>,
) -> Result<Json<ExportResponse>, AppError> {
    let view = state.view.lock().await;
    let result = view
        .result()
        .ok_or_else(|| AppError::Conflict("No analysis result to export".to_string()))?;

    Ok(Json(ExportResponse {
        filename: brief_filename(result),
        content: render_brief(result, chrono::Local::now().date_naive()),
    }))
}
