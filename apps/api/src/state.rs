use std::sync::Arc;

use tokio::sync::Mutex;

use crate::analysis::Analyzer;
use crate::view::{AnalysisView, ErrorDisplay};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable analysis backend. Default: AnalysisService over Gemini.
    pub analyzer: Arc<dyn Analyzer>,
    /// The dashboard's view state. Locked only for transitions, never across the
    /// backend call.
    pub view: Arc<Mutex<AnalysisView>>,
}

impl AppState {
    pub fn new(analyzer: Arc<dyn Analyzer>, errors: ErrorDisplay) -> Self {
        Self {
            analyzer,
            view: Arc::new(Mutex::new(AnalysisView::new(errors))),
        }
    }
}
