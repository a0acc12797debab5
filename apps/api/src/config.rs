use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_HISTORY_KEY: &str = "placement-readiness-history";

/// Application configuration loaded from environment variables.
/// Every variable is optional; startup fails only on unparseable values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// In-process memory store when unset.
    pub redis_url: Option<String>,
    pub history_key: String,
    /// Replaces the built-in heuristic tables when set.
    pub heuristics_path: Option<PathBuf>,
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
            redis_url: optional_env("REDIS_URL"),
            history_key: optional_env("HISTORY_KEY")
                .unwrap_or_else(|| DEFAULT_HISTORY_KEY.to_string()),
            heuristics_path: optional_env("HEURISTICS_PATH").map(PathBuf::from),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            redis_url: None,
            history_key: DEFAULT_HISTORY_KEY.to_string(),
            heuristics_path: None,
        }
    }
}

/// Unset and blank are the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
