// All LLM prompt constants for the Analysis module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{RAW_JSON_ONLY, SEARCH_GROUNDING_INSTRUCTION};

/// Video-presence audit prompt template.
/// Replace: {org_name}, {output_format}, {grounding_instruction}
pub const AUDIT_PROMPT_TEMPLATE: &str = r#"You are an expert Video Strategy Consultant.
Audit the *publicly accessible* video presence of: "{org_name}" using Google Search.

{output_format}

{grounding_instruction}

**Structure**:
{
  "organizationName": "Exact Name",
  "summary": "Executive summary of their video maturity.",
  "estimatedImpactScore": 0-100 integer (0-30=High Opp, 31-60=Avg, 61-100=Strong),
  "metrics": [ {"label": "string", "value": "string", "trend": "up|down|neutral", "description": "optional string"} ],
  "platforms": [
    {
      "name": "YouTube|LinkedIn|Instagram|TikTok|Website",
      "status": "Strong|Average|Weak|Missing",
      "url": "https://...",
      "contentStrategy": "1 sentence summary",
      "auditSnippet": "5-7 word ruthless verdict",
      "followerCount": "string e.g. 10k",
      "engagementLevel": "string e.g. Low",
      "lastActivityDate": "string e.g. 2 days ago"
    }
  ],
  "weaknesses": ["string", "string"],
  "strengths": ["string"],
  "opportunities": ["string"],
  "strategy": {
    "relationshipBuilding": "1-2 sentences on how to open the relationship",
    "emailFramework": {
      "subjectLine": "string",
      "hook": "string",
      "problem": "string",
      "solution": "string",
      "cta": "string"
    },
    "improvementIdeas": ["string", "string", "string"]
  }
}

**Task**:
1. Search for official profiles on YouTube, LinkedIn, Instagram, TikTok, Website.
2. Assess metrics and content health.
3. If data is not found, mark status as "Missing".
4. Focus strategy on "Video Presence" gaps."#;

/// Builds the audit prompt for one organization.
pub fn build_audit_prompt(org_name: &str) -> String {
    AUDIT_PROMPT_TEMPLATE
        .replace("{output_format}", RAW_JSON_ONLY)
        .replace("{grounding_instruction}", SEARCH_GROUNDING_INSTRUCTION)
        .replace("{org_name}", org_name)
}
