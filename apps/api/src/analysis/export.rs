//! Plain-text strategy brief. Pure function of the result and a date.

use chrono::NaiveDate;

use crate::models::analysis::AnalysisResult;

/// `<Organization_Name>_Video_Strategy.txt`; each whitespace run becomes one `_`.
pub fn brief_filename(result: &AnalysisResult) -> String {
    let mut name = String::with_capacity(result.organization_name.len());
    let mut in_space = false;
    for c in result.organization_name.chars() {
        if c.is_whitespace() {
            if !in_space {
                name.push('_');
            }
            in_space = true;
        } else {
            name.push(c);
            in_space = false;
        }
    }
    format!("{name}_Video_Strategy.txt")
}

/// Renders the downloadable brief. `date` is printed as M/D/YYYY.
pub fn render_brief(result: &AnalysisResult, date: NaiveDate) -> String {
    let email = &result.strategy.email_framework;

    let weaknesses = result
        .weaknesses
        .iter()
        .map(|w| format!("- {w}"))
        .collect::<Vec<_>>()
        .join("\n");

    let platforms = result
        .platforms
        .iter()
        .map(|p| {
            format!(
                "\n{} ({})\nStrategy: {}\nVerdict: {}\n",
                p.name.to_uppercase(),
                p.status,
                p.content_strategy,
                p.audit_snippet
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let ideas = result
        .strategy
        .improvement_ideas
        .iter()
        .enumerate()
        .map(|(i, idea)| format!("{}. {idea}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    let content = format!(
        "\
MISSIONLENS STRATEGY REPORT
Organization: {org}
Date: {date}
Impact Score: {score}/100

EXECUTIVE SUMMARY
{summary}

CRITICAL GAPS
{weaknesses}

PLATFORM AUDIT
{platforms}

COLD OUTREACH PLAYBOOK
Subject: {subject}
Hook: {hook}
Problem: {problem}
Solution: {solution}
CTA: {cta}

RECOMMENDATIONS
{ideas}",
        org = result.organization_name,
        date = date.format("%-m/%-d/%Y"),
        score = result.estimated_impact_score,
        summary = result.summary,
        subject = email.subject_line,
        hook = email.hook,
        problem = email.problem,
        solution = email.solution,
        cta = email.cta,
    );

    content.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::{PitchFramework, PlatformAnalysis, PlatformStatus, Strategy};

    fn food_bank() -> AnalysisResult {
        AnalysisResult {
            organization_name: "Local Food Bank".to_string(),
            summary: "Video is inconsistent.".to_string(),
            estimated_impact_score: 35,
            platforms: vec![PlatformAnalysis {
                name: "YouTube".to_string(),
                status: PlatformStatus::Missing,
                ..Default::default()
            }],
            weaknesses: vec!["No video presence".to_string()],
            strategy: Strategy {
                email_framework: PitchFramework {
                    subject_line: "Hi".to_string(),
                    hook: "h".to_string(),
                    problem: "p".to_string(),
                    solution: "s".to_string(),
                    cta: "c".to_string(),
                },
                improvement_ideas: vec!["Start posting weekly".to_string()],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    #[test]
    fn test_brief_contains_score_and_gaps() {
        let brief = render_brief(&food_bank(), date());
        assert!(brief.lines().any(|l| l == "Impact Score: 35/100"));
        assert!(brief.contains("CRITICAL GAPS\n- No video presence\n"));
    }

    #[test]
    fn test_brief_exact_layout() {
        let expected = [
            "MISSIONLENS STRATEGY REPORT",
            "Organization: Local Food Bank",
            "Date: 3/7/2026",
            "Impact Score: 35/100",
            "",
            "EXECUTIVE SUMMARY",
            "Video is inconsistent.",
            "",
            "CRITICAL GAPS",
            "- No video presence",
            "",
            "PLATFORM AUDIT",
            "",
            "YOUTUBE (Missing)",
            "Strategy: ",
            "Verdict: ",
            "",
            "",
            "COLD OUTREACH PLAYBOOK",
            "Subject: Hi",
            "Hook: h",
            "Problem: p",
            "Solution: s",
            "CTA: c",
            "",
            "RECOMMENDATIONS",
            "1. Start posting weekly",
        ]
        .join("\n");
        assert_eq!(render_brief(&food_bank(), date()), expected);
    }

    #[test]
    fn test_brief_is_reproducible() {
        let result = food_bank();
        assert_eq!(render_brief(&result, date()), render_brief(&result, date()));
    }

    #[test]
    fn test_brief_numbers_recommendations_from_one() {
        let mut result = food_bank();
        result.strategy.improvement_ideas = vec!["A".to_string(), "B".to_string()];
        let brief = render_brief(&result, date());
        assert!(brief.ends_with("RECOMMENDATIONS\n1. A\n2. B"));
    }

    #[test]
    fn test_filename_replaces_whitespace_runs() {
        assert_eq!(
            brief_filename(&food_bank()),
            "Local_Food_Bank_Video_Strategy.txt"
        );
        let mut result = food_bank();
        result.organization_name = "St.  Mary's\tShelter".to_string();
        assert_eq!(
            brief_filename(&result),
            "St._Mary's_Shelter_Video_Strategy.txt"
        );
    }
}
