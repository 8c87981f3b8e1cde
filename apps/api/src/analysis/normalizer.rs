//! Response Normalizer — turns the model's untrusted JSON text into a fully-populated
//! `AnalysisResult`.
//!
//! Text is parsed into an untyped `serde_json::Value` first, then read field by field.
//! Every field has its own default; one bad field never rejects the payload. Only text
//! that is not JSON at all is an error.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::llm_client::strip_json_fences;
use crate::models::analysis::{
    AnalysisResult, Metric, MetricValue, PitchFramework, PlatformAnalysis, PlatformStatus,
    Source, Strategy, Trend,
};

pub const SUMMARY_FALLBACK: &str = "Analysis not available.";

/// Top-level text could not be parsed as JSON.
#[derive(Debug, thiserror::Error)]
#[error("response is not valid JSON: {0}")]
pub struct MalformedResponse(#[source] pub serde_json::Error);

/// Built-in pitch used when the model supplies no email framework.
pub fn default_pitch() -> PitchFramework {
    PitchFramework {
        subject_line: "Question about your video strategy".to_string(),
        hook: "I noticed some opportunities in your current video messaging.".to_string(),
        problem: "Inconsistent video can limit reach.".to_string(),
        solution: "I help nonprofits streamline their message.".to_string(),
        cta: "Open to a 5-minute chat?".to_string(),
    }
}

/// Strips any code fence, parses the text, and normalizes it.
pub fn normalize_text(
    text: &str,
    query: &str,
    sources: Vec<Source>,
) -> Result<AnalysisResult, MalformedResponse> {
    let value: Value = serde_json::from_str(strip_json_fences(text)).map_err(|e| {
        debug!("Unparseable model output: {text}");
        MalformedResponse(e)
    })?;
    Ok(normalize(&value, query, sources))
}

/// Builds an `AnalysisResult` from an already-parsed value. Never fails.
pub fn normalize(value: &Value, query: &str, sources: Vec<Source>) -> AnalysisResult {
    let empty = Map::new();
    let data = value.as_object().unwrap_or_else(|| {
        warn!("Model output is JSON but not an object; using defaults for every field");
        &empty
    });

    let organization_name = match data.get("organizationName") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => query.to_string(),
    };

    let summary = match data.get("summary") {
        Some(Value::String(s)) => s.clone(),
        _ => SUMMARY_FALLBACK.to_string(),
    };

    let strategy = data.get("strategy").and_then(Value::as_object);

    AnalysisResult {
        organization_name,
        summary,
        estimated_impact_score: impact_score(data.get("estimatedImpactScore")),
        metrics: objects(data.get("metrics")).map(metric).collect(),
        platforms: objects(data.get("platforms")).map(platform).collect(),
        weaknesses: strings(data.get("weaknesses")),
        strengths: strings(data.get("strengths")),
        opportunities: strings(data.get("opportunities")),
        strategy: Strategy {
            relationship_building: strategy
                .and_then(|s| s.get("relationshipBuilding"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            email_framework: strategy
                .and_then(|s| s.get("emailFramework"))
                .and_then(Value::as_object)
                .map(pitch)
                .unwrap_or_else(default_pitch),
            improvement_ideas: strings(strategy.and_then(|s| s.get("improvementIdeas"))),
        },
        sources,
    }
}

/// Any JSON number, rounded and clamped to 0..=100. Anything else is 0.
fn impact_score(value: Option<&Value>) -> u8 {
    match value.and_then(Value::as_f64) {
        Some(n) if n.is_finite() => n.round().clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}

fn objects(value: Option<&Value>) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

fn strings(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Optional text; numbers are kept as their decimal text ("followerCount": 1200).
fn optional_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn metric(obj: &Map<String, Value>) -> Metric {
    let value = match obj.get("value") {
        Some(Value::Number(n)) => MetricValue::Number(n.clone()),
        Some(Value::String(s)) => MetricValue::Text(s.clone()),
        _ => MetricValue::default(),
    };
    Metric {
        label: string_field(obj, "label"),
        value,
        trend: obj.get("trend").and_then(Value::as_str).and_then(Trend::parse),
        description: optional_text(obj, "description"),
    }
}

fn platform(obj: &Map<String, Value>) -> PlatformAnalysis {
    PlatformAnalysis {
        name: string_field(obj, "name"),
        status: obj
            .get("status")
            .and_then(Value::as_str)
            .and_then(PlatformStatus::parse)
            .unwrap_or_default(),
        follower_count: optional_text(obj, "followerCount"),
        engagement_level: optional_text(obj, "engagementLevel"),
        last_activity_date: optional_text(obj, "lastActivityDate"),
        content_strategy: string_field(obj, "contentStrategy"),
        audit_snippet: string_field(obj, "auditSnippet"),
        url: optional_text(obj, "url"),
    }
}

fn pitch(obj: &Map<String, Value>) -> PitchFramework {
    PitchFramework {
        subject_line: string_field(obj, "subjectLine"),
        hook: string_field(obj, "hook"),
        problem: string_field(obj, "problem"),
        solution: string_field(obj, "solution"),
        cta: string_field(obj, "cta"),
    }
}
