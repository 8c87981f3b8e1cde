//! Dashboard view model — everything the template shows, precomputed from an
//! `AnalysisResult` so the template stays free of logic.

use crate::llm_client::grounding::is_web_url;
use crate::models::analysis::{AnalysisResult, PlatformAnalysis, PlatformStatus, Trend};

/// Comparison bar target.
pub const GOAL_SCORE: u8 = 95;
/// The dashboard shows at most this many headline metrics.
const MAX_METRICS: usize = 4;

/// Qualitative band for an impact score.
pub fn score_label(score: u8) -> &'static str {
    match score {
        80.. => "Industry Leader",
        60..=79 => "Strong Performance",
        40..=59 => "Average",
        _ => "Needs Improvement",
    }
}

fn score_tone(score: u8) -> &'static str {
    match score {
        80.. => "emerald",
        60..=79 => "indigo",
        40..=59 => "amber",
        _ => "rose",
    }
}

fn status_tone(status: PlatformStatus) -> &'static str {
    match status {
        PlatformStatus::Strong => "emerald",
        PlatformStatus::Average => "amber",
        PlatformStatus::Weak => "rose",
        PlatformStatus::Missing => "slate",
    }
}

fn trend_glyph(trend: Option<Trend>) -> &'static str {
    match trend {
        Some(Trend::Up) => "↑",
        Some(Trend::Down) => "↓",
        _ => "–",
    }
}

/// Link shown under a platform card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartLink {
    pub href: String,
    pub label: String,
}

/// The profile URL when it looks real, otherwise a web search for the profile.
/// Only http(s) URLs are ever linked directly.
pub fn smart_link(url: Option<&str>, platform: &str, org: &str) -> SmartLink {
    match url {
        Some(u) if u.len() > 5 && !u.contains("null") && is_web_url(u) => SmartLink {
            href: u.to_string(),
            label: "View Channel".to_string(),
        },
        _ => SmartLink {
            href: format!(
                "https://www.google.com/search?q={}",
                urlencoding::encode(&format!("{org} {platform}"))
            ),
            label: format!("Find on {platform}"),
        },
    }
}

pub struct MetricCard {
    pub label: String,
    pub value: String,
    pub trend: &'static str,
    pub description: String,
}

pub struct PlatformCard {
    pub name: String,
    pub status: &'static str,
    pub tone: &'static str,
    pub missing: bool,
    pub audit_snippet: String,
    pub content_strategy: String,
    /// Empty when unknown.
    pub follower_count: String,
    pub engagement_level: String,
    pub last_activity_date: String,
    pub link: SmartLink,
}

impl PlatformCard {
    fn from_platform(p: &PlatformAnalysis, org: &str) -> Self {
        Self {
            name: p.name.clone(),
            status: p.status.as_str(),
            tone: status_tone(p.status),
            missing: p.status == PlatformStatus::Missing,
            audit_snippet: p.audit_snippet.clone(),
            content_strategy: p.content_strategy.clone(),
            follower_count: p.follower_count.clone().unwrap_or_default(),
            engagement_level: p.engagement_level.clone().unwrap_or_default(),
            last_activity_date: p.last_activity_date.clone().unwrap_or_default(),
            link: smart_link(p.url.as_deref(), &p.name, org),
        }
    }
}

pub struct SourceLink {
    pub title: String,
    pub uri: String,
}

pub struct DashboardView {
    pub organization_name: String,
    pub summary: String,
    pub score: u8,
    pub goal_score: u8,
    pub score_label: &'static str,
    pub score_tone: &'static str,
    pub high_opportunity: bool,
    pub already_optimized: bool,
    pub weaknesses: Vec<String>,
    pub strengths: Vec<String>,
    pub opportunities: Vec<String>,
    pub metrics: Vec<MetricCard>,
    pub platforms: Vec<PlatformCard>,
    pub relationship_building: String,
    pub subject_line: String,
    pub hook: String,
    pub problem: String,
    pub solution: String,
    pub cta: String,
    pub improvement_ideas: Vec<String>,
    pub sources: Vec<SourceLink>,
}

impl DashboardView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let score = result.estimated_impact_score;
        let org = &result.organization_name;
        let email = &result.strategy.email_framework;

        Self {
            organization_name: org.clone(),
            summary: result.summary.clone(),
            score,
            goal_score: GOAL_SCORE,
            score_label: score_label(score),
            score_tone: score_tone(score),
            high_opportunity: score < 50,
            already_optimized: score >= 80,
            weaknesses: result.weaknesses.clone(),
            strengths: result.strengths.clone(),
            opportunities: result.opportunities.clone(),
            metrics: result
                .metrics
                .iter()
                .take(MAX_METRICS)
                .map(|m| MetricCard {
                    label: m.label.clone(),
                    value: m.value.to_string(),
                    trend: trend_glyph(m.trend),
                    description: m.description.clone().unwrap_or_default(),
                })
                .collect(),
            platforms: result
                .platforms
                .iter()
                .map(|p| PlatformCard::from_platform(p, org))
                .collect(),
            relationship_building: result.strategy.relationship_building.clone(),
            subject_line: email.subject_line.clone(),
            hook: email.hook.clone(),
            problem: email.problem.clone(),
            solution: email.solution.clone(),
            cta: email.cta.clone(),
            improvement_ideas: result.strategy.improvement_ideas.clone(),
            sources: result
                .sources
                .iter()
                .map(|s| SourceLink {
                    title: s.display_title().to_string(),
                    uri: s.uri.clone(),
                })
                .collect(),
        }
    }
}
