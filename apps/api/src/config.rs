use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub provider_api_key: String,
    pub jwt_secret: String,
    /// Model used for resume rewriting and feedback.
    pub resume_model: String,
    /// Model used for cover-letter text.
    pub letter_model: String,
    /// Hard timeout on a single provider call, in seconds.
    pub generation_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            provider_api_key: require_env("COHERE_API_KEY")?,
            jwt_secret: require_env("JWT_SECRET")?,
            resume_model: std::env::var("RESUME_MODEL")
                .unwrap_or_else(|_| "command-r-plus".to_string()),
            letter_model: std::env::var("LETTER_MODEL").unwrap_or_else(|_| "command".to_string()),
            generation_timeout_secs: std::env::var("GENERATION_TIMEOUT_SECS")
                .unwrap_or_else(|_| "45".to_string())
                .parse::<u64>()
                .context("GENERATION_TIMEOUT_SECS must be a number of seconds")?,
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

#[cfg(test)]
impl Config {
    /// Fixed config for unit tests — no env access.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://unused".to_string(),
            provider_api_key: "test-key".to_string(),
            jwt_secret: "test-secret".to_string(),
            resume_model: "command-r-plus".to_string(),
            letter_model: "command".to_string(),
            generation_timeout_secs: 45,
            port: 0,
            rust_log: "info".to_string(),
        }
    }
}
