//! Benchmark configuration (YAML + environment overrides).
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `REVIEW_BENCH_OLLAMA_URL` | Backend base URL (default: `http://localhost:11434`) |
//! | `REVIEW_BENCH_TIMEOUT` | Per-call timeout in seconds (default: 600) |

use crate::errors::{BenchError, BenchResult};
use crate::prompt::{default_categories, PromptTemplate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the Ollama-compatible server.
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Upper bound for a single `generate` call.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_timeout() -> u64 {
    600
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Trials per model.
    #[serde(default = "default_trials")]
    pub trials: u32,

    /// Category taxonomy; also the report columns.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Fail the run instead of emitting a "model failed" row.
    #[serde(default)]
    pub fail_on_empty_model: bool,

    /// Append every recorded trial as a JSON line here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_log: Option<PathBuf>,

    /// Custom prompt file with a `{{review}}` placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<PathBuf>,
}

fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

fn default_models() -> Vec<String> {
    [
        "llama3.2",
        "llama3.2:3b-text-q8_0",
        "qwen2.5:0.5b",
        "qwen2.5:1.5b",
        "qwen2.5:3b",
        "qwen2.5:7b",
        "qwen2.5:14b",
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}

fn default_trials() -> u32 {
    3
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            backend: BackendConfig::default(),
            models: default_models(),
            trials: default_trials(),
            categories: default_categories(),
            fail_on_empty_model: false,
            audit_log: None,
            prompt_template: None,
        }
    }
}

impl BenchConfig {
    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend.url = url.into();
        self
    }

    pub fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_audit_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.audit_log = Some(path.into());
        self
    }

    /// Apply `REVIEW_BENCH_*` overrides.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("REVIEW_BENCH_OLLAMA_URL") {
            self.backend.url = url;
        }
        if let Some(t) = std::env::var("REVIEW_BENCH_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.backend.timeout_secs = t;
        }
        self
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.version != SUPPORTED_CONFIG_VERSION {
            return Err(BenchError::config(format!(
                "unsupported config version {} (supported: {})",
                self.version, SUPPORTED_CONFIG_VERSION
            )));
        }
        if self.models.is_empty() {
            return Err(BenchError::config("config has no models"));
        }
        if self.models.iter().any(|m| m.trim().is_empty()) {
            return Err(BenchError::config("model names must not be empty"));
        }
        if self.trials == 0 {
            return Err(BenchError::config("trials must be at least 1"));
        }
        if self.backend.timeout_secs == 0 {
            return Err(BenchError::config("backend.timeout_secs must be at least 1"));
        }
        if self.categories.is_empty() {
            return Err(BenchError::config("config has no categories"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.categories.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(BenchError::config(format!("duplicate category '{}'", dup)));
        }
        Ok(())
    }

    /// Built-in prompt for the configured taxonomy, or the custom template file.
    pub fn load_prompt(&self) -> BenchResult<PromptTemplate> {
        match &self.prompt_template {
            None => Ok(PromptTemplate::for_categories(&self.categories)),
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    BenchError::config(format!(
                        "failed to read prompt template {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                PromptTemplate::from_text(raw)
            }
        }
    }
}

pub fn load_config(path: &Path) -> BenchResult<BenchConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        BenchError::config(format!("failed to read config {}: {}", path.display(), e))
    })?;
    let cfg: BenchConfig = serde_yaml::from_str(&raw)
        .map_err(|e| BenchError::config(format!("failed to parse YAML: {}", e)))?;
    let cfg = cfg.apply_env_overrides();
    cfg.validate()?;
    Ok(cfg)
}

pub fn write_sample_config(path: &Path) -> BenchResult<()> {
    let yaml = serde_yaml::to_string(&BenchConfig::default())
        .map_err(|e| BenchError::config(format!("failed to render sample config: {}", e)))?;
    std::fs::write(path, yaml)
        .map_err(|e| BenchError::config(format!("failed to write sample config: {}", e)))?;
    Ok(())
}
