use crate::errors::{BenchError, BenchResult};
use crate::model::{ModelBundle, SelectedResponse};
use tracing::warn;

/// What the report shows for one model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutcome {
    Selected(SelectedResponse),
    /// No valid trial; reported explicitly instead of being dropped.
    Failed { model: String, reason: String },
}

impl ModelOutcome {
    pub fn model(&self) -> &str {
        match self {
            Self::Selected(s) => &s.model,
            Self::Failed { model, .. } => model,
        }
    }
}

/// Entry with the smallest elapsed seconds.
pub fn select(bundle: &ModelBundle) -> BenchResult<SelectedResponse> {
    let (elapsed_secs, categories) =
        bundle
            .entries()
            .next()
            .ok_or_else(|| BenchError::EmptyBundle {
                model: bundle.model.clone(),
                attempted: bundle.stats.attempted,
            })?;
    Ok(SelectedResponse {
        model: bundle.model.clone(),
        elapsed_secs,
        categories: categories.clone(),
    })
}

/// Order-preserving selection. Empty bundles become [`ModelOutcome::Failed`]
/// unless `fail_on_empty` is set, in which case the first one aborts.
pub fn select_all(bundles: &[ModelBundle], fail_on_empty: bool) -> BenchResult<Vec<ModelOutcome>> {
    bundles
        .iter()
        .map(|bundle| match select(bundle) {
            Ok(selected) => Ok(ModelOutcome::Selected(selected)),
            Err(e @ BenchError::EmptyBundle { .. }) if !fail_on_empty => {
                warn!(model = %bundle.model, "no valid trial, reporting model as failed");
                Ok(ModelOutcome::Failed {
                    model: bundle.model.clone(),
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(e),
        })
        .collect()
}
