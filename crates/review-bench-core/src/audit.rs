//! Append-only JSONL audit log of every recorded trial.
//!
//! Writing is best effort: failures are logged and never reach the caller.

use crate::model::{CategoryMap, TrialResult};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct AuditRecord<'a> {
    pub model_name: &'a str,
    pub comment: &'a str,
    pub trial: u32,
    pub elapsed_secs: u64,
    pub response: &'a CategoryMap,
    pub recorded_at: String,
}

impl<'a> AuditRecord<'a> {
    pub fn new(model: &'a str, review: &'a str, trial: &'a TrialResult) -> Self {
        Self {
            model_name: model,
            comment: review,
            trial: trial.trial,
            elapsed_secs: trial.elapsed_secs,
            response: &trial.categories,
            recorded_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &AuditRecord<'_>) {
        if let Err(e) = self.try_append(record) {
            warn!(path = %self.path.display(), error = %e, "failed to append audit record");
        }
    }

    fn try_append(&self, record: &AuditRecord<'_>) -> std::io::Result<()> {
        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}
