use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use review_bench_core::{indexed_path, load_config, load_corpus, write_csv, Benchmark, OllamaClient};
use tracing::{info, warn};

use crate::cli::args::RunArgs;
use crate::exit_codes::{RUN_FAILED, SUCCESS};

pub async fn run(args: RunArgs) -> anyhow::Result<i32> {
    let mut cfg = load_config(&args.config)?;
    if !args.models.is_empty() {
        cfg = cfg.with_models(args.models.clone());
    }
    if let Some(url) = &args.url {
        cfg = cfg.with_backend_url(url.as_str());
    }
    if let Some(path) = &args.audit_log {
        cfg = cfg.with_audit_log(path);
    }

    let jobs = collect_jobs(&args)?;
    let backend = Arc::new(OllamaClient::new(&cfg.backend)?);
    let bench = Benchmark::from_config(&cfg, backend)?;
    info!(
        models = bench.models().len(),
        reviews = jobs.len(),
        backend = %cfg.backend.url,
        "starting benchmark"
    );

    let mut any_failed = false;
    for job in jobs {
        let report = bench.run(&job.review).await?;
        write_csv(&job.out, &report)?;
        info!(path = %job.out.display(), "report written");
        if report.has_failures() {
            warn!(models = ?report.failed_models, "models without a valid trial");
            any_failed = true;
        }
    }

    Ok(if any_failed { RUN_FAILED } else { SUCCESS })
}

struct Job {
    review: String,
    out: PathBuf,
}

fn collect_jobs(args: &RunArgs) -> anyhow::Result<Vec<Job>> {
    if let Some(review) = &args.review {
        return Ok(vec![Job {
            review: review.clone(),
            out: args.out.clone(),
        }]);
    }

    let corpus_path = args
        .corpus
        .as_ref()
        .context("either --review or --corpus is required")?;
    let reviews = load_corpus(corpus_path)?;
    if reviews.is_empty() {
        anyhow::bail!("corpus {} contains no reviews", corpus_path.display());
    }

    let jobs = match args.index {
        Some(i) => {
            let review = reviews.get(i).cloned().with_context(|| {
                format!(
                    "--index {} out of range (corpus has {} reviews)",
                    i,
                    reviews.len()
                )
            })?;
            vec![Job {
                review,
                out: indexed_path(&args.out, i),
            }]
        }
        None => reviews
            .into_iter()
            .enumerate()
            .map(|(i, review)| Job {
                review,
                out: indexed_path(&args.out, i),
            })
            .collect(),
    };
    Ok(jobs)
}
