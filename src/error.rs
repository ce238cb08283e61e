//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// A source could not be turned into test cases
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Error: Cannot find test case '{}'", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error: Cannot read test case '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error: Malformed test case '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error: Bad test case '{}', must export `run` function.", .path.display())]
    MissingRun { path: PathBuf },
}

/// Rejected benchmark configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("cannot read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that stops a harness run before its report
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("test case \"{title}\" failed: {source:#}")]
    Execution {
        title: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),
}
