//! Non-streaming client for the Ollama `/api/generate` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::SummarizeError;

use super::prompt::build_prompt;

/// Upper bound for one generation request.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Only `response` and `done` are consumed; `model` and `created_at` are ignored.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
    done: bool,
}

/// Turns a patch into a natural-language summary.
///
/// This abstraction allows driving the audit pipeline without a live model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, patch: &str) -> Result<String, SummarizeError>;
}

/// [`Summarizer`] that posts to an Ollama-compatible generate endpoint.
pub struct OllamaClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, SummarizeError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizeError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SummarizeError::ClientBuild)?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, SummarizeError> {
        Self::new(&config.ollama_endpoint, &config.ollama_model)
    }

    /// Send an already-built prompt and return the trimmed generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String, SummarizeError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let transport = |source| SummarizeError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            return Err(SummarizeError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        parse_generate_response(&body)
    }
}

#[async_trait]
impl Summarizer for OllamaClient {
    async fn summarize(&self, patch: &str) -> Result<String, SummarizeError> {
        let prompt = build_prompt(patch);
        debug!(
            "Requesting summary from {} ({} prompt bytes)",
            self.model,
            prompt.len()
        );
        self.generate(&prompt).await
    }
}

/// Decode a single non-streaming reply.
fn parse_generate_response(body: &str) -> Result<String, SummarizeError> {
    let reply: GenerateResponse = serde_json::from_str(body).map_err(SummarizeError::Decode)?;

    if !reply.done {
        warn!("Generation response indicates 'done' is false for a non-streaming request");
    }

    Ok(reply.response.trim().to_string())
}
