// Presentation layer
// Implements: Idle/Loading/Success/Error state machine, server-rendered dashboard,
// text-brief download. Print-to-PDF is the browser's own print flow.

pub mod dashboard;
pub mod handlers;
pub mod state;

pub use state::{AnalysisView, ErrorDisplay, ViewState};
