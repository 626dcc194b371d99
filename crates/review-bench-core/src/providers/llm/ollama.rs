//! Ollama `/api/generate` client.

use super::{InferenceBackend, OutputFormat};
use crate::config::BackendConfig;
use crate::errors::{BenchError, BenchResult};
use crate::model::GenerateOutcome;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::debug;

const USER_AGENT_VALUE: &str = concat!("review-bench/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub format: &'static str,
    pub stream: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub response: String,
    /// Total duration in nanoseconds.
    #[serde(default)]
    pub total_duration: Option<u64>,
}

impl From<GenerateResponse> for GenerateOutcome {
    fn from(resp: GenerateResponse) -> Self {
        // Ollama reports 0 when it skipped timing; that is no timing at all.
        GenerateOutcome::new(resp.response, resp.total_duration.filter(|n| *n > 0))
    }
}

#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// The per-call timeout is enforced by the trial runner, not by reqwest.
    pub fn new(config: &BackendConfig) -> BenchResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(|e| BenchError::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        format: OutputFormat,
    ) -> anyhow::Result<GenerateOutcome> {
        let url = self.generate_url();
        debug!(url = %url, model, "calling ollama generate");

        let body = GenerateRequest {
            model,
            prompt,
            format: format.as_str(),
            stream: false,
        };
        let resp = self.client.post(&url).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!("ollama generate error (status {}): {}", status, error_text);
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("failed to parse ollama response: {}", e))?;
        Ok(parsed.into())
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}
