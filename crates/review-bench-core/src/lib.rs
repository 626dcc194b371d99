//! Multi-model latency benchmark for restaurant-review fact extraction.
//!
//! The same extraction prompt is sent to several local models. Each model gets
//! a fixed number of trials; a response without timing metadata is retried
//! once and then dropped. The fastest valid trial per model is normalized into
//! a fixed-width report row (one column per category of the taxonomy).
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use review_bench_core::{write_csv, BenchConfig, Benchmark, OllamaClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let cfg = BenchConfig::default().with_models(vec!["qwen2.5:3b".into()]);
//! let backend = Arc::new(OllamaClient::new(&cfg.backend)?);
//! let bench = Benchmark::from_config(&cfg, backend)?;
//!
//! let report = bench.run("Bread was stale. The place was so hot.").await?;
//! write_csv(std::path::Path::new("result.csv"), &report)?;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod errors;
pub mod model;
pub mod prompt;
pub mod providers;
pub mod report;

pub use audit::{AuditLog, AuditRecord};
pub use config::{load_config, write_sample_config, BackendConfig, BenchConfig};
pub use corpus::{load_corpus, parse_corpus};
pub use engine::{
    select, select_all, Benchmark, ModelOutcome, Orchestrator, TrialPolicy, TrialRunner,
};
pub use errors::{BenchError, BenchResult};
pub use model::{
    BundleStats, CategoryMap, ExtractionRecord, GenerateOutcome, ModelBundle, ReportRow,
    SelectedResponse, Sentiment, TrialResult,
};
pub use prompt::{default_categories, PromptTemplate, DEFAULT_CATEGORIES};
pub use providers::llm::{InferenceBackend, OllamaClient, OutputFormat, ScriptStep, ScriptedBackend};
pub use report::{indexed_path, write_csv, write_csv_to, Normalizer, ReviewReport, SENTINEL};
