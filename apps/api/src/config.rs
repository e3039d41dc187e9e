use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_BASE_URL;
use crate::rate_limit::RateLimitRule;
use crate::similarity::ModelChoice;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    /// Shared secret expected in `X-API-KEY`.
    pub api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub embedding_model: ModelChoice,
    pub embedding_cache_dir: Option<PathBuf>,
    pub rate_limit: RateLimitRule,
    pub output_dir: Option<PathBuf>,
    pub font_path: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| {
            get(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        Ok(Config {
            openai_api_key: require("OPENAI_API_KEY")?,
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: require("API_KEY")?,
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            embedding_model: get("EMBEDDING_MODEL")
                .map(|id| ModelChoice::from_id(&id))
                .transpose()
                .context("EMBEDDING_MODEL is not a supported model")?
                .unwrap_or_default(),
            embedding_cache_dir: get("EMBEDDING_CACHE_DIR").map(PathBuf::from),
            rate_limit: get("RATE_LIMIT")
                .map(|rule| rule.parse::<RateLimitRule>())
                .transpose()?
                .unwrap_or_default(),
            output_dir: get("OUTPUT_DIR").map(PathBuf::from),
            font_path: get("FONT_PATH").map(PathBuf::from),
            max_upload_bytes: get("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        })
    }
}
