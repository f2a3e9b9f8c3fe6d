use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only the database URL is required; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Gemini API key for the LLM and embedding scorers. `None` means no
    /// provider is configured and the keyword scorer carries every request.
    pub gemini_api_key: Option<String>,
    pub catalog_url: String,
    pub catalog_cache_path: String,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_CATALOG_URL: &str = "https://www.shl.com/solutions/products/product-catalog/";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            catalog_url: std::env::var("CATALOG_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string()),
            catalog_cache_path: std::env::var("CATALOG_CACHE_PATH")
                .unwrap_or_else(|_| "assessments.json".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// An empty string counts as unset — a blank `GEMINI_API_KEY=` line in a
/// .env file must not flip the provider-configured state on.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
