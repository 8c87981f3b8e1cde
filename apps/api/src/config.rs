use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_API_BASE;

/// Build-time placeholder some deploy setups inject instead of a real key.
pub const PLACEHOLDER_API_KEY: &str = "DUMMY_KEY_FOR_BUILD";

/// Application configuration loaded from environment variables.
///
/// A missing AI credential does not stop startup: it is recorded as `None` and every
/// analysis then fails with a configuration error before any network call.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub port: u16,
    pub rust_log: String,
    pub detailed_errors: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let raw_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok();

        Ok(Config {
            gemini_api_key: usable_credential(raw_key.as_deref()),
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            detailed_errors: std::env::var("DETAILED_ERRORS")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    /// First four characters of the key, for startup logs. Never log the whole key.
    pub fn masked_api_key(&self) -> Option<String> {
        self.gemini_api_key
            .as_deref()
            .map(|k| format!("{}...", k.chars().take(4).collect::<String>()))
    }
}

/// Empty, whitespace-only, and placeholder values count as absent.
pub fn usable_credential(raw: Option<&str>) -> Option<String> {
    let key = raw?.trim();
    if key.is_empty() || key == PLACEHOLDER_API_KEY {
        None
    } else {
        Some(key.to_string())
    }
}
