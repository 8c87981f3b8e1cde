// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Output-format fragment. The search tool cannot be combined with a JSON response
/// mode, so the format has to be requested in prose.
pub const RAW_JSON_ONLY: &str = "**Output Format**: Return ONLY raw JSON. \
    Do not use Markdown formatting. \
    Do NOT include any text outside the JSON object.";

/// Grounding fragment appended to every search-backed prompt.
pub const SEARCH_GROUNDING_INSTRUCTION: &str = "\
    Base every claim on what you find with Google Search. \
    Do NOT invent follower counts, dates, or URLs. \
    If a profile cannot be found, say so instead of guessing.";
