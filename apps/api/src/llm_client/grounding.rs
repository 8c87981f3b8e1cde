//! Citation extraction — the adapter between the vendor's grounding metadata and
//! `Source` records. Nothing outside this file reads `groundingMetadata`.

use reqwest::Url;
use tracing::debug;

use crate::llm_client::LlmResponse;
use crate::models::analysis::Source;

/// True for absolute `http`/`https` URLs. Anything else from the model
/// (`javascript:`, `data:`, relative paths) must not become a link.
pub fn is_web_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Pulls the search citations a response was grounded on.
pub trait CitationExtractor: Send + Sync {
    fn extract(&self, response: &LlmResponse) -> Vec<Source>;
}

/// Reads `candidates[0].groundingMetadata.groundingChunks[].web`.
/// Chunks without an http(s) URI are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroundingChunkExtractor;

impl CitationExtractor for GroundingChunkExtractor {
    fn extract(&self, response: &LlmResponse) -> Vec<Source> {
        let Some(metadata) = response
            .candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
        else {
            return Vec::new();
        };

        metadata
            .grounding_chunks
            .iter()
            .filter_map(|chunk| chunk.web.as_ref())
            .filter_map(|web| {
                let uri = web.uri.as_deref()?.trim();
                if !is_web_url(uri) {
                    debug!("Skipping grounding chunk with non-web URI");
                    return None;
                }
                Some(Source {
                    title: web.title.clone(),
                    uri: uri.to_string(),
                })
            })
            .collect()
    }
}
