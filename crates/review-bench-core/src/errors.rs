//! Error types for the benchmark harness.

/// Benchmark errors.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    /// Backend returned text that is not a JSON object although JSON output was requested.
    #[error("malformed payload from model '{model}' (trial {trial}): {message}")]
    MalformedPayload {
        model: String,
        trial: u32,
        message: String,
    },

    /// Every trial for a model was abandoned, so there is nothing to select.
    #[error("model '{model}' produced no valid trial out of {attempted} attempted")]
    EmptyBundle { model: String, attempted: u32 },

    /// Transport or protocol failure talking to the inference backend.
    #[error("backend error for model '{model}': {message}")]
    Backend { model: String, message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Review corpus could not be loaded.
    #[error("corpus error: {message}")]
    Corpus { message: String },

    /// Report could not be written.
    #[error("report error: {message}")]
    Report { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BenchError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } | Self::Corpus { .. } => 2,
            Self::Backend { .. } => 3,
            Self::MalformedPayload { .. } => 4,
            Self::EmptyBundle { .. } => 5,
            Self::Report { .. } | Self::Io(_) => 6,
        }
    }
}

impl From<csv::Error> for BenchError {
    fn from(err: csv::Error) -> Self {
        Self::Report {
            message: err.to_string(),
        }
    }
}

/// Result type for benchmark operations.
pub type BenchResult<T> = Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_separate_run_failures_from_config() {
        assert_eq!(BenchError::config("x").exit_code(), 2);
        let empty = BenchError::EmptyBundle {
            model: "qwen2.5:3b".into(),
            attempted: 3,
        };
        assert_eq!(empty.exit_code(), 5);
        assert!(empty.to_string().contains("qwen2.5:3b"));
    }
}
