//! Benchmark pipeline: trials -> bundles -> fastest response -> report table.

pub mod orchestrator;
pub mod select;
pub mod trial;
pub mod validator;

pub use orchestrator::Orchestrator;
pub use select::{select, select_all, ModelOutcome};
pub use trial::{TrialPolicy, TrialRunner, DEFAULT_TRIALS};

use crate::audit::AuditLog;
use crate::config::BenchConfig;
use crate::errors::BenchResult;
use crate::providers::llm::InferenceBackend;
use crate::report::{Normalizer, ReviewReport};
use std::sync::Arc;

/// Config-driven wiring of orchestrator, selector and normalizer.
#[derive(Clone)]
pub struct Benchmark {
    orchestrator: Orchestrator,
    normalizer: Normalizer,
    models: Vec<String>,
    fail_on_empty_model: bool,
}

impl Benchmark {
    pub fn from_config(cfg: &BenchConfig, backend: Arc<dyn InferenceBackend>) -> BenchResult<Self> {
        cfg.validate()?;
        let policy = TrialPolicy {
            trials: cfg.trials,
            call_timeout: cfg.backend.timeout(),
        };
        let mut orchestrator =
            Orchestrator::new(TrialRunner::new(backend, policy), cfg.load_prompt()?);
        if let Some(path) = &cfg.audit_log {
            orchestrator = orchestrator.with_audit(AuditLog::new(path));
        }
        Ok(Self {
            orchestrator,
            normalizer: Normalizer::new(cfg.categories.clone()),
            models: cfg.models.clone(),
            fail_on_empty_model: cfg.fail_on_empty_model,
        })
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub async fn run(&self, review: &str) -> BenchResult<ReviewReport> {
        let bundles = self.orchestrator.run_all(&self.models, review).await?;
        let outcomes = select_all(&bundles, self.fail_on_empty_model)?;
        let failed_models = outcomes
            .iter()
            .filter(|o| matches!(o, ModelOutcome::Failed { .. }))
            .map(|o| o.model().to_string())
            .collect();
        Ok(ReviewReport {
            review: review.to_string(),
            table: self.normalizer.table(&outcomes),
            failed_models,
        })
    }
}
