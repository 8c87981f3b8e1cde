use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Analysis(e) => {
                tracing::error!("Analysis error ({}): {e}", e.code());
                let status = match e {
                    AnalysisError::Configuration => StatusCode::SERVICE_UNAVAILABLE,
                    AnalysisError::EmptyQuery => StatusCode::BAD_REQUEST,
                    AnalysisError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                    AnalysisError::Unauthorized(_)
                    | AnalysisError::EmptyResponse
                    | AnalysisError::MalformedResponse
                    | AnalysisError::Transport(_) => StatusCode::BAD_GATEWAY,
                };
                (status, e.code(), e.user_message())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
