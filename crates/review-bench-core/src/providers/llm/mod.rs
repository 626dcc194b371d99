use crate::model::GenerateOutcome;
use async_trait::async_trait;

pub mod fake;
pub mod ollama;

pub use fake::{ScriptStep, ScriptedBackend};
pub use ollama::OllamaClient;

/// Structured output mode requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
        }
    }
}

/// Black-box inference service.
///
/// When `format` is [`OutputFormat::Json`] the backend is expected to return
/// syntactically valid JSON in `response_text`.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        format: OutputFormat,
    ) -> anyhow::Result<GenerateOutcome>;

    fn provider_name(&self) -> &'static str;
}
