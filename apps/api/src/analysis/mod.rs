// Video-presence analysis
// Implements: audit prompt, backend call, citation collection, response normalization,
// plain-text brief export.
// All LLM calls go through llm_client — no direct Gemini HTTP calls here.

pub mod export;
pub mod handlers;
pub mod normalizer;
pub mod prompts;
pub mod service;

pub use service::{AnalysisError, AnalysisService, Analyzer};
