mod analysis;
mod config;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
mod view;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::AnalysisService;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::view::ErrorDisplay;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on an unparseable PORT)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MissionLens v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (absent credential is reported per request, not fatal here)
    let llm = match (&config.gemini_api_key, config.masked_api_key()) {
        (Some(key), Some(masked)) => {
            info!(
                "LLM client initialized (model: {}, key: {masked})",
                llm_client::MODEL
            );
            Some(LlmClient::new(key.clone(), config.gemini_api_base.clone()))
        }
        _ => {
            warn!("GEMINI_API_KEY is missing or a placeholder; every analysis will fail with a configuration error");
            None
        }
    };

    let errors = if config.detailed_errors {
        ErrorDisplay::Detailed
    } else {
        ErrorDisplay::Generic
    };

    // Build app state
    let state = AppState::new(Arc::new(AnalysisService::new(llm)), errors);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
