use super::trial::TrialRunner;
use crate::audit::{AuditLog, AuditRecord};
use crate::errors::BenchResult;
use crate::model::ModelBundle;
use crate::prompt::PromptTemplate;
use tracing::info;

/// Runs every configured model, sequentially, against one review.
#[derive(Clone)]
pub struct Orchestrator {
    runner: TrialRunner,
    prompt: PromptTemplate,
    audit: Option<AuditLog>,
}

impl Orchestrator {
    pub fn new(runner: TrialRunner, prompt: PromptTemplate) -> Self {
        Self {
            runner,
            prompt,
            audit: None,
        }
    }

    pub fn with_audit(mut self, audit: AuditLog) -> Self {
        self.audit = Some(audit);
        self
    }

    /// One bundle per model, in `models` order. Stops at the first fatal error.
    pub async fn run_all(&self, models: &[String], review: &str) -> BenchResult<Vec<ModelBundle>> {
        let prompt = self.prompt.render(review);
        let mut bundles = Vec::with_capacity(models.len());

        for model in models {
            info!(model = %model, trials = self.runner.policy().trials, "start of model");

            let audit = self.audit.as_ref();
            let bundle = self
                .runner
                .run_model_with(model, &prompt, |trial| {
                    if let Some(log) = audit {
                        log.append(&AuditRecord::new(model, review, trial));
                    }
                })
                .await?;

            let s = bundle.stats;
            info!(
                model = %model,
                attempted = s.attempted,
                recorded = s.recorded,
                retried = s.retried,
                abandoned = s.abandoned,
                collisions = s.collisions,
                "end of model"
            );
            bundles.push(bundle);
        }

        Ok(bundles)
    }
}
