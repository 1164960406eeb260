//! Generation client — the single point of entry for all provider calls.
//!
//! ARCHITECTURAL RULE: no other module may call the text-generation API
//! directly. All provider interactions go through [`TextGenerator`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const COHERE_API_URL: &str = "https://api.cohere.ai/v1/generate";

/// Decoding parameters for a single generation call. Fixed per artifact kind.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Why a generation call failed. `is_transient` tells the caller whether a
/// retry could plausibly succeed — the client itself never retries.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("provider call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("provider returned status {status}")]
    Provider { status: u16, message: String },

    #[error("invalid provider credentials")]
    Auth,

    #[error("provider returned no text")]
    EmptyOutput,
}

impl GenerationError {
    pub fn is_transient(&self) -> bool {
        match self {
            GenerationError::Unreachable(_) | GenerationError::Timeout { .. } => true,
            GenerationError::Provider { status, .. } => *status == 429 || *status >= 500,
            GenerationError::Auth | GenerationError::EmptyOutput => false,
        }
    }

    /// Machine-checkable failure reason for the error payload.
    pub fn reason(&self) -> &'static str {
        match self {
            GenerationError::Unreachable(_) => "unreachable",
            GenerationError::Timeout { .. } => "timeout",
            GenerationError::Provider { .. } => "provider",
            GenerationError::Auth => "auth",
            GenerationError::EmptyOutput => "empty-output",
        }
    }
}

/// The generation capability consumed by the artifact service. Implemented by
/// [`CohereClient`] in production and by stubs in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// First candidate's text, trimmed. `None` when the provider returned no
    /// candidates or only whitespace.
    fn first_text(&self) -> Option<&str> {
        self.generations
            .first()
            .and_then(|g| g.text.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: String,
}

/// Thin wrapper over the Cohere generate endpoint.
#[derive(Clone)]
pub struct CohereClient {
    client: Client,
    api_key: String,
    timeout_secs: u64,
}

impl CohereClient {
    pub fn new(api_key: String, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            timeout_secs,
        }
    }
}

#[async_trait]
impl TextGenerator for CohereClient {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let request_body = GenerateRequest {
            model: &params.model,
            prompt,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        let response = self
            .client
            .post(COHERE_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        seconds: self.timeout_secs,
                    }
                } else {
                    GenerationError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(GenerationError::Auth);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(GenerationError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Unreachable(e.to_string()))?;

        let text = parsed.first_text().ok_or(GenerationError::EmptyOutput)?;

        debug!(
            "Generation succeeded: model={}, output_chars={}",
            params.model,
            text.len()
        );

        Ok(text.to_string())
    }
}
