pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as api;
use crate::state::AppState;
use crate::view::handlers as view;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Dashboard
        .route("/", get(view::index))
        .route("/analyze", post(view::submit))
        .route("/dismiss", post(view::dismiss))
        .route("/export/brief.txt", get(view::download_brief))
        // JSON API
        .route("/api/v1/analyze", post(api::handle_analyze))
        .route("/api/v1/view", get(view::view_snapshot))
        .route("/api/v1/export", get(api::handle_export))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tokio::sync::Notify;
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::{AnalysisError, Analyzer};
    use crate::models::analysis::{AnalysisResult, PlatformAnalysis, PlatformStatus};
    use crate::view::{ErrorDisplay, ViewState};

    /// Stub backend. Optionally waits on `gate` so tests can observe Loading.
    struct StubAnalyzer {
        calls: AtomicUsize,
        fail: bool,
        gate: Option<Arc<Notify>>,
    }

    impl StubAnalyzer {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: false,
                gate: None,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: true,
                gate: None,
            })
        }

        fn gated(gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: false,
                gate: Some(gate),
            })
        }
    }

    #[async_trait]
    impl Analyzer for StubAnalyzer {
        async fn analyze(&self, query: &str) -> Result<AnalysisResult, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail {
                return Err(AnalysisError::RateLimited);
            }
            Ok(AnalysisResult {
                organization_name: query.to_string(),
                estimated_impact_score: 35,
                platforms: vec![PlatformAnalysis {
                    name: "YouTube".to_string(),
                    status: PlatformStatus::Missing,
                    ..Default::default()
                }],
                weaknesses: vec!["No video presence".to_string()],
                ..Default::default()
            })
        }
    }

    struct PanickingAnalyzer;

    #[async_trait]
    impl Analyzer for PanickingAnalyzer {
        async fn analyze(&self, _query: &str) -> Result<AnalysisResult, AnalysisError> {
            panic!("analyzer blew up");
        }
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Polls until the spawned analysis has left Loading.
    async fn settle(state: &AppState) {
        for _ in 0..100 {
            if !state.view.lock().await.is_loading() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("analysis never completed");
    }

    #[tokio::test]
    async fn test_health() {
        let state = AppState::new(StubAnalyzer::ok(), ErrorDisplay::Generic);
        let response = build_router(state).oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("missionlens"));
    }

    #[tokio::test]
    async fn test_blank_submission_is_noop() {
        let stub = StubAnalyzer::ok();
        let state = AppState::new(stub.clone(), ErrorDisplay::Generic);
        let response = build_router(state.clone())
            .oneshot(form_post("/analyze", "query=+++"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(state.view.lock().await.state(), &ViewState::Idle);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_submission_reaches_success_and_renders_dashboard() {
        let state = AppState::new(StubAnalyzer::ok(), ErrorDisplay::Generic);
        let app = build_router(state.clone());

        app.clone()
            .oneshot(form_post("/analyze", "query=Local+Food+Bank"))
            .await
            .unwrap();
        settle(&state).await;

        let html = body_text(app.oneshot(get("/")).await.unwrap()).await;
        assert!(html.contains("Local Food Bank"));
        assert!(html.contains("High Opportunity Client"));
        assert!(html.contains("No verifiable public sources found."));
        assert!(html.contains("window.print()"));
    }

    #[tokio::test]
    async fn test_submission_while_loading_is_ignored() {
        let gate = Arc::new(Notify::new());
        let stub = StubAnalyzer::gated(gate.clone());
        let state = AppState::new(stub.clone(), ErrorDisplay::Generic);
        let app = build_router(state.clone());

        app.clone()
            .oneshot(form_post("/analyze", "query=First"))
            .await
            .unwrap();
        app.clone()
            .oneshot(form_post("/analyze", "query=Second"))
            .await
            .unwrap();

        assert_eq!(
            state.view.lock().await.state(),
            &ViewState::Loading {
                query: "First".to_string()
            }
        );
        let html = body_text(app.oneshot(get("/")).await.unwrap()).await;
        assert!(html.contains("Auditing First..."));

        gate.notify_one();
        settle(&state).await;
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            state.view.lock().await.result().unwrap().organization_name,
            "First"
        );
    }

    #[tokio::test]
    async fn test_failure_shows_generic_message_and_dismiss_returns_to_idle() {
        let state = AppState::new(StubAnalyzer::failing(), ErrorDisplay::Generic);
        let app = build_router(state.clone());

        app.clone()
            .oneshot(form_post("/analyze", "query=Food+Bank"))
            .await
            .unwrap();
        settle(&state).await;

        let html = body_text(app.clone().oneshot(get("/")).await.unwrap()).await;
        assert!(html.contains("Unable to complete analysis."));
        assert!(html.contains("Try again"));

        app.oneshot(form_post("/dismiss", "")).await.unwrap();
        assert_eq!(state.view.lock().await.state(), &ViewState::Idle);
    }

    #[tokio::test]
    async fn test_panicking_analysis_ends_in_error_and_accepts_new_search() {
        let state = AppState::new(Arc::new(PanickingAnalyzer), ErrorDisplay::Detailed);
        let app = build_router(state.clone());

        app.clone()
            .oneshot(form_post("/analyze", "query=Food+Bank"))
            .await
            .unwrap();
        settle(&state).await;

        match state.view.lock().await.state() {
            ViewState::Error { query, message } => {
                assert_eq!(query, "Food Bank");
                assert!(message.contains("analysis task failed"));
            }
            other => panic!("expected Error, got {other:?}"),
        }

        app.oneshot(form_post("/analyze", "query=River+Trust"))
            .await
            .unwrap();
        assert!(state.view.lock().await.is_loading());
        settle(&state).await;
    }

    #[tokio::test]
    async fn test_download_brief() {
        let state = AppState::new(StubAnalyzer::ok(), ErrorDisplay::Generic);
        let app = build_router(state.clone());

        let response = app.clone().oneshot(get("/export/brief.txt")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        app.clone()
            .oneshot(form_post("/analyze", "query=Local+Food+Bank"))
            .await
            .unwrap();
        settle(&state).await;

        let response = app.oneshot(get("/export/brief.txt")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("Local_Food_Bank_Video_Strategy.txt"));
        let text = body_text(response).await;
        assert!(text.contains("Impact Score: 35/100"));
        assert!(text.contains("- No video presence"));
    }

    #[tokio::test]
    async fn test_json_analyze_endpoint() {
        let state = AppState::new(StubAnalyzer::ok(), ErrorDisplay::Generic);
        let app = build_router(state);

        let request = Request::post("/api/v1/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"query": "River Trust"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["organizationName"], "River Trust");
        assert_eq!(json["platforms"][0]["status"], "Missing");

        let blank = Request::post("/api/v1/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"query": "  "}"#))
            .unwrap();
        let response = app.oneshot(blank).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_json_analyze_maps_rate_limit() {
        let state = AppState::new(StubAnalyzer::failing(), ErrorDisplay::Generic);
        let request = Request::post("/api/v1/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"query": "River Trust"}"#))
            .unwrap();
        let response = build_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"]["code"], "RATE_LIMITED");
    }

    #[tokio::test]
    async fn test_view_snapshot_reports_status() {
        let state = AppState::new(StubAnalyzer::ok(), ErrorDisplay::Generic);
        let response = build_router(state).oneshot(get("/api/v1/view")).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "IDLE");
    }
}
