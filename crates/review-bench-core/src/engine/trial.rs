use super::validator;
use crate::errors::{BenchError, BenchResult};
use crate::model::{CategoryMap, GenerateOutcome, ModelBundle, TrialResult};
use crate::providers::llm::{InferenceBackend, OutputFormat};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

pub const DEFAULT_TRIALS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialPolicy {
    pub trials: u32,
    /// Per backend call; a call that runs over counts as an outcome without timing.
    pub call_timeout: Duration,
}

impl Default for TrialPolicy {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            call_timeout: Duration::from_secs(600),
        }
    }
}

/// Runs the trials of one model, one blocking call at a time.
#[derive(Clone)]
pub struct TrialRunner {
    backend: Arc<dyn InferenceBackend>,
    policy: TrialPolicy,
}

impl TrialRunner {
    pub fn new(backend: Arc<dyn InferenceBackend>, policy: TrialPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn policy(&self) -> TrialPolicy {
        self.policy
    }

    pub async fn run_model(&self, model: &str, prompt: &str) -> BenchResult<ModelBundle> {
        self.run_model_with(model, prompt, |_| {}).await
    }

    /// Like [`run_model`](Self::run_model), handing each recorded trial to `observe`.
    pub async fn run_model_with<F>(
        &self,
        model: &str,
        prompt: &str,
        mut observe: F,
    ) -> BenchResult<ModelBundle>
    where
        F: FnMut(&TrialResult),
    {
        let mut bundle = ModelBundle::new(model);

        for trial in 1..=self.policy.trials {
            bundle.stats.attempted += 1;

            let Some((nanos, text)) = self.attempt(model, prompt, trial, &mut bundle).await?
            else {
                continue;
            };

            let elapsed_secs = validator::elapsed_seconds(nanos);
            let categories = parse_categories(model, trial, &text)?;
            info!(model, trial, elapsed_secs, "response ready");

            let result = TrialResult {
                trial,
                elapsed_secs,
                categories,
            };
            observe(&result);

            if bundle.insert(elapsed_secs, result.categories).is_some() {
                warn!(
                    model,
                    trial, elapsed_secs, "trial replaced an earlier one with the same elapsed time"
                );
            }
        }

        Ok(bundle)
    }

    /// One trial: a call plus at most one retry. `None` when the trial is abandoned.
    async fn attempt(
        &self,
        model: &str,
        prompt: &str,
        trial: u32,
        bundle: &mut ModelBundle,
    ) -> BenchResult<Option<(u64, String)>> {
        let first = self.invoke(model, prompt).await?;
        if let Some(nanos) = validator::timing(&first) {
            return Ok(Some((nanos, first.response_text)));
        }

        warn!(model, trial, "response omitted total duration, retrying once");
        bundle.stats.retried += 1;

        let retry = self.invoke(model, prompt).await?;
        match validator::timing(&retry) {
            Some(nanos) => Ok(Some((nanos, retry.response_text))),
            None => {
                warn!(model, trial, "retry had no timing either, skipping trial");
                bundle.stats.abandoned += 1;
                Ok(None)
            }
        }
    }

    async fn invoke(&self, model: &str, prompt: &str) -> BenchResult<GenerateOutcome> {
        debug!(model, provider = self.backend.provider_name(), "invoking backend");
        let call = self.backend.generate(model, prompt, OutputFormat::Json);
        match timeout(self.policy.call_timeout, call).await {
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(e)) => Err(BenchError::Backend {
                model: model.to_string(),
                message: format!("{:#}", e),
            }),
            Err(_) => {
                warn!(
                    model,
                    timeout_secs = self.policy.call_timeout.as_secs(),
                    "backend call timed out"
                );
                Ok(GenerateOutcome::timed_out())
            }
        }
    }
}

/// The payload must be a JSON object of category -> record.
pub fn parse_categories(model: &str, trial: u32, text: &str) -> BenchResult<CategoryMap> {
    let malformed = |message: String| BenchError::MalformedPayload {
        model: model.to_string(),
        trial,
        message,
    };
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(other) => Err(malformed(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(malformed(format!("invalid JSON: {}", e))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_objects_only() {
        let map = parse_categories("m", 1, r#"{"Timing": {"sntm": 1}}"#).unwrap();
        assert!(map.contains_key("Timing"));

        let err = parse_categories("m", 2, "[1,2]").unwrap_err();
        assert!(err.to_string().contains("an array"));

        let err = parse_categories("m", 3, "Sure! Here is the JSON").unwrap_err();
        assert!(matches!(err, BenchError::MalformedPayload { trial: 3, .. }));
    }
}
