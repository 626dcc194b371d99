use super::{InferenceBackend, OutputFormat};
use crate::model::GenerateOutcome;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum ScriptStep {
    Respond(GenerateOutcome),
    Fail(String),
    /// Never answers within any reasonable timeout.
    Hang,
}

impl ScriptStep {
    /// Valid response taking `nanos`.
    pub fn timed(text: impl Into<String>, nanos: u64) -> Self {
        Self::Respond(GenerateOutcome::new(text, Some(nanos)))
    }

    /// Response without timing metadata.
    pub fn untimed(text: impl Into<String>) -> Self {
        Self::Respond(GenerateOutcome::new(text, None))
    }
}

/// Backend replaying a fixed script of outcomes, one per call, in order.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<ScriptStep>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            script: Mutex::new(steps.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Models passed to `generate`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().expect("script lock").len()
    }
}

#[async_trait]
impl InferenceBackend for ScriptedBackend {
    async fn generate(
        &self,
        model: &str,
        _prompt: &str,
        _format: OutputFormat,
    ) -> anyhow::Result<GenerateOutcome> {
        self.calls.lock().expect("calls lock").push(model.to_string());
        let step = self.script.lock().expect("script lock").pop_front();
        match step {
            Some(ScriptStep::Respond(outcome)) => Ok(outcome),
            Some(ScriptStep::Fail(msg)) => Err(anyhow::anyhow!(msg)),
            Some(ScriptStep::Hang) => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                anyhow::bail!("scripted hang elapsed")
            }
            None => anyhow::bail!("script exhausted after {} calls", self.calls().len()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}
