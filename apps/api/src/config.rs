use std::time::Duration;

use anyhow::{Context, Result};

/// Upstream endpoint used when neither the request nor `LLM_API_BASE` names one.
pub const DEFAULT_API_BASE: &str = "https://ark.cn-beijing.volces.com/api/v3/chat/completions";
/// Model used when neither the request nor `LLM_MODEL` names one.
pub const DEFAULT_MODEL: &str = "doubao-seed-1-6-flash-250828";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Application configuration loaded from environment variables.
/// Every variable is optional; only malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fallback API key for requests that do not carry their own.
    pub default_api_key: Option<String>,
    pub default_api_base: String,
    pub default_model: String,
    pub llm_timeout: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            default_api_key: optional_env("LLM_API_KEY"),
            default_api_base: optional_env("LLM_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            default_model: optional_env("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_timeout: Duration::from_secs(match optional_env("LLM_TIMEOUT_SECS") {
                Some(raw) => raw
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
                None => DEFAULT_TIMEOUT_SECS,
            }),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_api_key: None,
            default_api_base: DEFAULT_API_BASE.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            llm_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

/// Reads an env var, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
