//! Presentation state machine: Idle → Loading → {Success, Error}.
//!
//! Pure and synchronous. The caller owns the async work: `submit` hands back the query
//! to run, `complete` takes the outcome. Only one analysis is in flight per view.

use serde::Serialize;
use tracing::warn;

use crate::analysis::service::AnalysisError;
use crate::models::analysis::AnalysisResult;

pub const GENERIC_ERROR_MESSAGE: &str =
    "Unable to complete analysis. Please try again later or check your connection.";

/// How failures are worded in the Error state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorDisplay {
    /// One retry-prompting message for every kind.
    #[default]
    Generic,
    /// `AnalysisError::user_message` per kind.
    Detailed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        query: String,
    },
    Success {
        query: String,
        result: Box<AnalysisResult>,
    },
    Error {
        query: String,
        message: String,
    },
}

#[derive(Debug, Default)]
pub struct AnalysisView {
    state: ViewState,
    errors: ErrorDisplay,
}

impl AnalysisView {
    pub fn new(errors: ErrorDisplay) -> Self {
        Self {
            state: ViewState::Idle,
            errors,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading { .. })
    }

    /// The held result, if the last analysis succeeded.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            ViewState::Success { result, .. } => Some(&**result),
            _ => None,
        }
    }

    /// Starts an analysis. Returns the trimmed query to run, or `None` when the
    /// submission is a no-op (blank query, or one already in flight).
    /// Any held result or error is discarded.
    pub fn submit(&mut self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() || self.is_loading() {
            return None;
        }
        self.state = ViewState::Loading {
            query: query.to_string(),
        };
        Some(query.to_string())
    }

    /// Records the outcome of the in-flight analysis.
    pub fn complete(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        let ViewState::Loading { query } = &self.state else {
            warn!("Analysis finished while the view was not loading; outcome dropped");
            return;
        };
        let query = query.clone();
        self.state = match outcome {
            Ok(result) => ViewState::Success {
                query,
                result: Box::new(result),
            },
            Err(err) => {
                let message = match self.errors {
                    ErrorDisplay::Generic => GENERIC_ERROR_MESSAGE.to_string(),
                    ErrorDisplay::Detailed => err.user_message(),
                };
                ViewState::Error { query, message }
            }
        };
    }

    /// "Try again": Error → Idle. No effect in any other state.
    pub fn dismiss(&mut self) {
        if matches!(self.state, ViewState::Error { .. }) {
            self.state = ViewState::Idle;
        }
    }
}
