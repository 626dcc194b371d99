use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "review-bench",
    version,
    about = "Benchmark local LLMs on restaurant-review fact extraction"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run every configured model against one review or a review corpus
    Run(RunArgs),
    /// Write a sample benchmark config
    Init(InitArgs),
    Version,
}

#[derive(Parser, Clone, Debug)]
pub struct RunArgs {
    #[arg(long, default_value = "bench.yaml")]
    pub config: PathBuf,

    /// Review text to analyze
    #[arg(long, conflicts_with = "corpus")]
    pub review: Option<String>,

    /// JSON file of the form {"data": ["review", ...]}
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Only run the review at this position of the corpus
    #[arg(long, requires = "corpus")]
    pub index: Option<usize>,

    /// Override the configured models (repeatable)
    #[arg(long = "model")]
    pub models: Vec<String>,

    /// Override the backend base URL
    #[arg(long)]
    pub url: Option<String>,

    /// CSV report path; corpus runs write <stem>_<n>.<ext> per review
    #[arg(long, default_value = "result.csv")]
    pub out: PathBuf,

    /// Append every recorded trial to this JSONL file
    #[arg(long)]
    pub audit_log: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug)]
pub struct InitArgs {
    #[arg(long, default_value = "bench.yaml")]
    pub config: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
