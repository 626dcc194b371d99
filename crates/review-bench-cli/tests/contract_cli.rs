#![allow(deprecated)]
//! CLI contract: exit codes, init, and a run against a mocked Ollama server.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(dir: &Path, url: &str) -> std::path::PathBuf {
    let cfg = dir.join("bench.yaml");
    fs::write(
        &cfg,
        format!(
            "version: 1\nbackend:\n  url: \"{}\"\n  timeout_secs: 10\nmodels:\n  - \"qwen2.5:3b\"\ntrials: 3\n",
            url
        ),
    )
    .unwrap();
    cfg
}

fn generate_body(total_duration: Option<u64>) -> serde_json::Value {
    let mut body = json!({
        "model": "qwen2.5:3b",
        "response": json!({
            "Service Quality": { "sntm": -1, "score": 3, "eF": "The staff was rude." }
        }).to_string(),
        "done": true
    });
    if let Some(d) = total_duration {
        body["total_duration"] = json!(d);
    }
    body
}

/// Runs the binary off the async runtime so the mock server keeps serving.
async fn run_bin(args: Vec<String>) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || {
        Command::cargo_bin("review-bench")
            .unwrap()
            .env_remove("REVIEW_BENCH_OLLAMA_URL")
            .env_remove("REVIEW_BENCH_TIMEOUT")
            .args(args)
            .assert()
    })
    .await
    .unwrap()
}

#[test]
fn version_prints_crate_version() {
    Command::cargo_bin("review-bench")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn init_writes_loadable_config_and_refuses_overwrite() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("bench.yaml");

    Command::cargo_bin("review-bench")
        .unwrap()
        .args(["init", "--config"])
        .arg(&cfg)
        .assert()
        .success();
    let raw = fs::read_to_string(&cfg).unwrap();
    assert!(raw.contains("qwen2.5:14b"));
    assert!(raw.contains("Product Quality"));

    Command::cargo_bin("review-bench")
        .unwrap()
        .args(["init", "--config"])
        .arg(&cfg)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn missing_config_is_config_error() {
    let dir = tempdir().unwrap();
    Command::cargo_bin("review-bench")
        .unwrap()
        .args(["run", "--review", "Great pasta.", "--config"])
        .arg(dir.path().join("nope.yaml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to read config"));
}

#[test]
fn run_without_input_is_config_error() {
    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), "http://127.0.0.1:9");
    Command::cargo_bin("review-bench")
        .unwrap()
        .args(["run", "--config"])
        .arg(&cfg)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--review or --corpus"));
}

#[tokio::test(flavor = "multi_thread")]
async fn run_writes_csv_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generate_body(Some(3_400_000_000))))
        .expect(3)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), &server.uri());
    let out = dir.path().join("result.csv");

    run_bin(vec![
        "run".into(),
        "--config".into(),
        cfg.display().to_string(),
        "--review".into(),
        "The staff was rude.".into(),
        "--out".into(),
        out.display().to_string(),
    ])
    .await
    .success();

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Model,Time In Seconds,"));
    assert!(csv.contains("qwen2.5:3b,3,"));
    assert!(csv.contains("Fact: The staff was rude."));
    assert!(csv.contains("Review:,The staff was rude."));
}

#[tokio::test(flavor = "multi_thread")]
async fn corpus_run_writes_one_report_per_review_and_flags_failed_models() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generate_body(None)))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let cfg = write_config(dir.path(), &server.uri());
    let corpus = dir.path().join("mixed_reviews_array.json");
    fs::write(
        &corpus,
        json!({ "data": ["Bread was stale.", "Great pasta."] }).to_string(),
    )
    .unwrap();
    let out = dir.path().join("result.csv");

    run_bin(vec![
        "run".into(),
        "--config".into(),
        cfg.display().to_string(),
        "--corpus".into(),
        corpus.display().to_string(),
        "--out".into(),
        out.display().to_string(),
    ])
    .await
    .code(1);

    for (i, review) in ["Bread was stale.", "Great pasta."].iter().enumerate() {
        let report = fs::read_to_string(dir.path().join(format!("result_{}.csv", i))).unwrap();
        assert!(report.contains("qwen2.5:3b,FAILED,"));
        assert!(report.contains(review));
    }
}
