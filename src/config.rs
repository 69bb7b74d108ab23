use crate::news::gemini::{GeminiSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Service configuration, read from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory for the file-backed collection. In-memory when unset.
    pub data_dir: Option<PathBuf>,
    pub gemini: GeminiSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup so tests need not touch the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| {
            lookup(key).filter(|v| !v.is_empty()).unwrap_or_else(|| {
                info!("{key} not set, using default: {default}");
                default.to_string()
            })
        };

        let port = var("PORT", "3001")
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let api_key = lookup("GEMINI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            warn!("GEMINI_API_KEY not set, news requests will fail");
        }

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            data_dir: lookup("DATA_DIR").filter(|v| !v.is_empty()).map(PathBuf::from),
            gemini: GeminiSettings {
                api_key,
                model: var("GEMINI_MODEL", DEFAULT_MODEL),
                base_url: var("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            },
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
