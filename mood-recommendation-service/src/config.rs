use anyhow::{Context as _, anyhow};
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";
/// The crate's own `static/` directory, so the binary works from any working directory.
pub const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Process-wide settings, read once at startup and handed to the service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub openai_api_key: String,
    pub omdb_api_key: Option<String>,
    pub openai_model: String,
    pub port: u16,
    pub openai_base_url: String,
    pub omdb_base_url: String,
    pub static_dir: PathBuf,
}

impl ServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let openai_api_key = var("OPENAI_API_KEY")
            .ok_or_else(|| anyhow!("OPENAI_API_KEY environment variable is required"))?;

        let omdb_api_key = var("OMDB_API_KEY");
        if omdb_api_key.is_none() {
            warn!("OMDB_API_KEY not set, posters and movie metadata will not load");
        }

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            openai_api_key,
            omdb_api_key,
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port,
            openai_base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            omdb_base_url: var("OMDB_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OMDB_BASE_URL.to_string()),
            static_dir: var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        })
    }
}
