use anyhow::{anyhow, Context, Result};

use crate::analysis::classifier::MatchMode;
use crate::session::DEFAULT_SESSION_TTL_SECS;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_SEARCH_MAX_RESULTS: usize = 5;

/// Application configuration loaded from environment variables.
/// Fails at startup if a present variable has an invalid value.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Enables the LLM-backed agent endpoints when set.
    pub anthropic_api_key: Option<String>,
    /// Enables web search for company research and job search when set.
    pub tavily_api_key: Option<String>,
    pub max_upload_bytes: usize,
    pub match_mode: MatchMode,
    pub search_max_results: usize,
    /// Idle time after which a session is dropped.
    pub session_ttl: chrono::Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            tavily_api_key: optional_env("TAVILY_API_KEY"),
            max_upload_bytes: parse_env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            match_mode: match optional_env("KEYWORD_MATCH_MODE") {
                Some(raw) => raw
                    .parse::<MatchMode>()
                    .map_err(|e| anyhow!(e))
                    .context("KEYWORD_MATCH_MODE is invalid")?,
                None => MatchMode::default(),
            },
            search_max_results: parse_env_or("SEARCH_MAX_RESULTS", DEFAULT_SEARCH_MAX_RESULTS)?,
            session_ttl: {
                let secs = parse_env_or("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS as usize)?;
                if secs == 0 {
                    return Err(anyhow!("SESSION_TTL_SECS must be greater than zero"));
                }
                i64::try_from(secs)
                    .ok()
                    .and_then(chrono::Duration::try_seconds)
                    .context("SESSION_TTL_SECS is out of range")?
            },
        })
    }
}

/// Returns the variable's value, treating unset and blank as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env_or(key: &str, default: usize) -> Result<usize> {
    match optional_env(key) {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'")),
        None => Ok(default),
    }
}
