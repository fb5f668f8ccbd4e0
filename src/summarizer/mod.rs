//! Abstractions for generating abstractive summaries via a local model runtime.
//!
//! The summarization capability is an explicit handle constructed once at
//! process start and owned by the service layer. The Ollama-backed client
//! issues a single blocking HTTP request per user trigger: no retries, no
//! caching, no batching.

mod prompt;

use crate::config::get_config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Errors surfaced while attempting summarization.
///
/// All variants are presented to the user as the same fixed retry message;
/// the distinction exists for server-side logging only.
#[derive(Debug, Error)]
pub enum SummarizerClientError {
    /// Provider was unreachable.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Length bounds requested from the model, in words.
#[derive(Debug, Clone, Copy)]
pub struct SummaryBounds {
    /// Minimum summary length.
    pub min_words: usize,
    /// Maximum summary length.
    pub max_words: usize,
}

/// A single summarization request passed to the provider.
#[derive(Debug, Clone)]
pub struct SummarizeRequest {
    /// Fully qualified model identifier understood by the provider.
    pub model: String,
    /// Extracted document text to summarize.
    pub text: String,
    /// Word-count bounds for the generated summary.
    pub bounds: SummaryBounds,
}

/// Interface implemented by summarization providers.
#[async_trait]
pub trait SummarizerClient: Send + Sync {
    /// Generate a summary of the request text using the configured model.
    async fn summarize(&self, request: SummarizeRequest)
    -> Result<String, SummarizerClientError>;
}

/// Build the summarization client from configuration.
pub fn get_summarizer_client() -> Box<dyn SummarizerClient + Send + Sync> {
    let config = get_config();
    let base_url = config
        .ollama_url
        .clone()
        .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
    Box::new(OllamaSummarizer::new(base_url))
}

struct OllamaSummarizer {
    http: Client,
    base_url: String,
}

impl OllamaSummarizer {
    fn new(base_url: String) -> Self {
        let http = Client::builder()
            .user_agent("docbrief/summary")
            .build()
            .expect("Failed to construct reqwest::Client for summarization");
        Self { http, base_url }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    done: bool,
}

#[async_trait]
impl SummarizerClient for OllamaSummarizer {
    async fn summarize(
        &self,
        request: SummarizeRequest,
    ) -> Result<String, SummarizerClientError> {
        let prompt = prompt::build_summary_prompt(&request.text, &request.bounds);
        let payload = json!({
            "model": request.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                // Zero temperature keeps repeat clicks on identical input deterministic.
                "temperature": 0.0,
            }
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizerClientError::ProviderUnavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizerClientError::ProviderUnavailable(format!(
                "Ollama endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerClientError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: OllamaResponse = response.json().await.map_err(|error| {
            SummarizerClientError::InvalidResponse(format!(
                "failed to decode Ollama response: {error}"
            ))
        })?;

        if !body.done {
            return Err(SummarizerClientError::InvalidResponse(
                "Ollama response incomplete (streaming not supported)".into(),
            ));
        }

        Ok(body.response.trim().to_string())
    }
}
