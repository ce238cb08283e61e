//! Configuration module

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::stats::MIN_SAMPLES;

/// Run-wide benchmark settings, read-only once the harness starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Measured invocations per sample pass
    pub iter: u64,

    /// Untimed invocations before each measured batch
    pub warmup: u64,

    /// Sample passes per test case
    pub sample: usize,

    /// Per-pass log lines instead of a spinner
    pub verbose: bool,

    /// Pause between test cases
    pub cooldown_ms: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iter: 1,
            warmup: 50,
            sample: 50,
            verbose: false,
            cooldown_ms: 100,
        }
    }
}

impl BenchConfig {
    /// Load config from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let config_path = std::env::var("OPSBENCH_CONFIG")
            .unwrap_or_else(|_| "opsbench.json".to_string());

        let mut config = if Path::new(&config_path).exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };

        if let Ok(verbose) = std::env::var("OPSBENCH_VERBOSE") {
            config.verbose = matches!(verbose.as_str(), "1" | "true" | "yes");
        }

        Ok(config)
    }

    /// Read a JSON config file; absent fields keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: PathBuf::from(path),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })
    }

    /// Save config to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: PathBuf::from(path),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iter == 0 {
            return Err(ConfigError::InvalidValue {
                field: "iter",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.sample < MIN_SAMPLES {
            return Err(ConfigError::InvalidValue {
                field: "sample",
                reason: format!(
                    "must be at least {} so one high and one low outlier can be trimmed",
                    MIN_SAMPLES
                ),
            });
        }
        Ok(())
    }
}
