//! Analysis Request Service — builds the audit prompt, makes the one backend call,
//! collects citations, and hands the text to the normalizer.
//!
//! Failures are classified here, once, into `AnalysisError`. No retry, no cache.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::normalizer::normalize_text;
use crate::analysis::prompts::build_audit_prompt;
use crate::llm_client::grounding::{CitationExtractor, GroundingChunkExtractor};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::analysis::AnalysisResult;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("AI backend credential is missing or a placeholder")]
    Configuration,

    #[error("query must not be blank")]
    EmptyQuery,

    #[error("AI backend returned an empty response")]
    EmptyResponse,

    #[error("AI backend response could not be parsed as JSON")]
    MalformedResponse,

    #[error("AI backend is rate limiting requests")]
    RateLimited,

    #[error("AI backend rejected the credential: {0}")]
    Unauthorized(String),

    #[error("AI backend call failed: {0}")]
    Transport(String),
}

impl AnalysisError {
    /// Stable machine-readable code for API responses and logs.
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::Configuration => "CONFIGURATION_ERROR",
            AnalysisError::EmptyQuery => "EMPTY_QUERY",
            AnalysisError::EmptyResponse => "EMPTY_RESPONSE",
            AnalysisError::MalformedResponse => "MALFORMED_RESPONSE",
            AnalysisError::RateLimited => "RATE_LIMITED",
            AnalysisError::Unauthorized(_) => "UNAUTHORIZED",
            AnalysisError::Transport(_) => "TRANSPORT_ERROR",
        }
    }

    /// Per-kind text suitable for showing to the person who ran the search.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Configuration => {
                "Configuration Error: the AI API key is missing. Set GEMINI_API_KEY and restart."
                    .to_string()
            }
            AnalysisError::EmptyQuery => "Enter an organization name to analyze.".to_string(),
            AnalysisError::EmptyResponse => {
                "The AI returned an empty response. The model might be overloaded.".to_string()
            }
            AnalysisError::MalformedResponse => {
                "Failed to parse the AI analysis. Please try again.".to_string()
            }
            AnalysisError::RateLimited => {
                "You are being rate limited by the AI provider. Please wait a minute and try again."
                    .to_string()
            }
            AnalysisError::Unauthorized(_) => {
                "Invalid API Key. Please check your environment variables.".to_string()
            }
            AnalysisError::Transport(msg) => format!("The analysis request failed: {msg}"),
        }
    }
}

impl From<LlmError> for AnalysisError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { status: 429, .. } => AnalysisError::RateLimited,
            LlmError::Api {
                status: 400 | 401 | 403,
                message,
            } => AnalysisError::Unauthorized(message),
            other => AnalysisError::Transport(other.to_string()),
        }
    }
}

/// Anything that can turn an organization name into an audit.
/// Handlers depend on this rather than on `AnalysisService` directly.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, query: &str) -> Result<AnalysisResult, AnalysisError>;
}

pub struct AnalysisService {
    /// `None` when no usable credential was configured.
    llm: Option<LlmClient>,
    citations: Arc<dyn CitationExtractor>,
}

impl AnalysisService {
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self::with_extractor(llm, Arc::new(GroundingChunkExtractor))
    }

    pub fn with_extractor(llm: Option<LlmClient>, citations: Arc<dyn CitationExtractor>) -> Self {
        Self { llm, citations }
    }
}

#[async_trait]
impl Analyzer for AnalysisService {
    async fn analyze(&self, query: &str) -> Result<AnalysisResult, AnalysisError> {
        // Checked before anything touches the network.
        let llm = self.llm.as_ref().ok_or(AnalysisError::Configuration)?;

        let query = query.trim();
        if query.is_empty() {
            return Err(AnalysisError::EmptyQuery);
        }

        info!("Analyzing video presence of {query:?}");
        let prompt = build_audit_prompt(query);

        let response = llm.generate_with_search(&prompt).await.map_err(|e| {
            warn!("Analysis backend call failed: {e}");
            AnalysisError::from(e)
        })?;

        // Citations come from response metadata, whether or not the body parses.
        let sources = self.citations.extract(&response);
        debug!("Extracted {} grounding citations", sources.len());

        let text = response.text().ok_or(AnalysisError::EmptyResponse)?;

        normalize_text(&text, query, sources).map_err(|e| {
            warn!("Analysis response was not JSON: {e}");
            AnalysisError::MalformedResponse
        })
    }
}
