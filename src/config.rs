//! Environment-driven configuration for the HTTP clients.
//!
//! Required variables: `API_URL`, `API_KEY`, `EMBEDDING_MODEL`,
//! `GENERATION_MODEL`. Optional with defaults: `EMBEDDING_DIM` (768),
//! `REQUEST_TIMEOUT_SECS` (30), `RAG_TOP_K` (3).

use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {0}")]
    MissingVars(String),
    #[error("Invalid value for {var}: {reason}")]
    InvalidVar { var: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct RagConfig {
    pub api_url: Url,
    pub api_key: String,
    pub embedding_model: String,
    pub generation_model: String,
    pub embedding_dim: usize,
    pub request_timeout_secs: u64,
    pub top_k: usize,
}

impl RagConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = ["API_URL", "API_KEY", "EMBEDDING_MODEL", "GENERATION_MODEL"];
        let missing: Vec<&str> = required
            .iter()
            .filter(|var| lookup(var).is_none())
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing.join(", ")));
        }

        let api_url_raw = lookup("API_URL").unwrap_or_default();
        let api_url = Url::parse(&api_url_raw).map_err(|e| ConfigError::InvalidVar {
            var: "API_URL".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            api_url,
            api_key: lookup("API_KEY").unwrap_or_default(),
            embedding_model: lookup("EMBEDDING_MODEL").unwrap_or_default(),
            generation_model: lookup("GENERATION_MODEL").unwrap_or_default(),
            embedding_dim: parse_or(&lookup, "EMBEDDING_DIM", 768)?,
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
            top_k: parse_or(&lookup, "RAG_TOP_K", 3)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
