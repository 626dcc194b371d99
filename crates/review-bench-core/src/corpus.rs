//! Review corpus loading: a JSON object with a `data` array of review strings.

use crate::errors::{BenchError, BenchResult};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CorpusFile {
    data: Vec<String>,
}

pub fn parse_corpus(raw: &str) -> BenchResult<Vec<String>> {
    let file: CorpusFile = serde_json::from_str(raw).map_err(|e| BenchError::Corpus {
        message: format!("expected {{\"data\": [..]}} of review strings: {}", e),
    })?;
    Ok(file.data)
}

pub fn load_corpus(path: &Path) -> BenchResult<Vec<String>> {
    let raw = std::fs::read_to_string(path).map_err(|e| BenchError::Corpus {
        message: format!("failed to read corpus {}: {}", path.display(), e),
    })?;
    parse_corpus(&raw)
}
