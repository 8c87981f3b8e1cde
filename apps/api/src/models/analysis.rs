use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction tag on a headline metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Trend::Up),
            "down" => Some(Trend::Down),
            "neutral" => Some(Trend::Neutral),
            _ => None,
        }
    }
}

/// Metric values arrive as either text ("10k") or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(serde_json::Number),
    Text(String),
}

impl Default for MetricValue {
    fn default() -> Self {
        MetricValue::Text(String::new())
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{n}"),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub label: String,
    pub value: MetricValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Coarse rating of an organization's presence on one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformStatus {
    Strong,
    Average,
    Weak,
    #[default]
    Missing,
}

impl PlatformStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "strong" => Some(PlatformStatus::Strong),
            "average" => Some(PlatformStatus::Average),
            "weak" => Some(PlatformStatus::Weak),
            "missing" => Some(PlatformStatus::Missing),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformStatus::Strong => "Strong",
            PlatformStatus::Average => "Average",
            PlatformStatus::Weak => "Weak",
            PlatformStatus::Missing => "Missing",
        }
    }
}

impl fmt::Display for PlatformStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit of a single channel.
///
/// When `status` is `Missing`, empty `content_strategy` / `audit_snippet` are expected
/// and must not be treated as an error by consumers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformAnalysis {
    pub name: String,
    pub status: PlatformStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity_date: Option<String>,
    #[serde(default)]
    pub content_strategy: String,
    #[serde(default)]
    pub audit_snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Cold-outreach email skeleton. Used verbatim in exported copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchFramework {
    pub subject_line: String,
    pub hook: String,
    pub problem: String,
    pub solution: String,
    pub cta: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    #[serde(default)]
    pub relationship_building: String,
    pub email_framework: PitchFramework,
    #[serde(default)]
    pub improvement_ideas: Vec<String>,
}

/// A grounding citation reported by the search tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub uri: String,
}

impl Source {
    /// Title for display; falls back to the URI when the backend gave none.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => &self.uri,
        }
    }
}

/// One complete video-presence audit. Built once per search, never persisted.
///
/// Collections are always present (possibly empty) and the score is always set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub organization_name: String,
    pub summary: String,
    /// 0-100; lower means more room to sell.
    pub estimated_impact_score: u8,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub platforms: Vec<PlatformAnalysis>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    pub strategy: Strategy,
    #[serde(default)]
    pub sources: Vec<Source>,
}
