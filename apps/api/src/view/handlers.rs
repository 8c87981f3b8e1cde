//! HTML route handlers for the dashboard.

use askama::Template;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::analysis::export::{brief_filename, render_brief};
use crate::analysis::AnalysisError;
use crate::errors::AppError;
use crate::state::AppState;
use crate::view::dashboard::DashboardView;
use crate::view::ViewState;

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    loading: bool,
    query: String,
    error: Option<String>,
    dashboard: Option<DashboardView>,
}

impl IndexTemplate {
    fn from_state(state: &ViewState) -> Self {
        match state {
            ViewState::Idle => Self {
                loading: false,
                query: String::new(),
                error: None,
                dashboard: None,
            },
            ViewState::Loading { query } => Self {
                loading: true,
                query: query.clone(),
                error: None,
                dashboard: None,
            },
            ViewState::Success { query, result } => Self {
                loading: false,
                query: query.clone(),
                error: None,
                dashboard: Some(DashboardView::from_result(result)),
            },
            ViewState::Error { query, message } => Self {
                loading: false,
                query: query.clone(),
                error: Some(message.clone()),
                dashboard: None,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

// ============================================================
// HANDLERS
// ============================================================

/// GET / - Render the current view.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let template = IndexTemplate::from_state(state.view.lock().await.state());
    let html = template
        .render()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Template render failed: {e}")))?;
    Ok(Html(html))
}

/// POST /analyze - Submit a search. Blank queries and submissions while an
/// analysis is running leave the view untouched.
pub async fn submit(State(state): State<AppState>, Form(form): Form<SearchForm>) -> Redirect {
    let query = state.view.lock().await.submit(&form.query);

    match query {
        Some(query) => {
            info!("Starting analysis for {query:?}");
            let analyzer = state.analyzer.clone();
            let view = state.view.clone();
            tokio::spawn(async move {
                // Run the analysis in its own task so a panic still ends Loading.
                let task = tokio::spawn(async move { analyzer.analyze(&query).await });
                let outcome = task.await.unwrap_or_else(|e| {
                    error!("Analysis task failed: {e}");
                    Err(AnalysisError::Transport(format!("analysis task failed: {e}")))
                });
                view.lock().await.complete(outcome);
            });
        }
        None => debug!("Ignored search submission (blank or already loading)"),
    }

    Redirect::to("/")
}

/// POST /dismiss - "Try again" from the error panel.
pub async fn dismiss(State(state): State<AppState>) -> Redirect {
    state.view.lock().await.dismiss();
    Redirect::to("/")
}

/// GET /export/brief.txt - Download the plain-text brief.
pub async fn download_brief(State(state): State<AppState>) -> Result<Response, AppError> {
    let view = state.view.lock().await;
    let result = view
        .result()
        .ok_or_else(|| AppError::Conflict("No analysis result to export".to_string()))?;

    let filename = brief_filename(result);
    let content = render_brief(result, chrono::Local::now().date_naive());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename.replace('"', "")),
            ),
        ],
        content,
    )
        .into_response())
}

/// GET /api/v1/view - JSON snapshot of the view state.
pub async fn view_snapshot(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.view.lock().await.state().clone())
}
