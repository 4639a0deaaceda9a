
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread::available_parallelism;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read config file [{path}]: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("Unable to parse config file [{path}]: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error
    },
    #[error("Invalid config: [{field}] must be greater than zero")]
    Invalid {
        field: &'static str
    }
}

/// Settings of one pipeline run. Every key is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Transactions per worker chunk.
    pub chunk_size: usize,
    /// Pending transactions that trigger a dispatch.
    pub batch_size: usize,
    /// Chunks decoded at the same time.
    pub max_workers: usize,
    pub output_path: PathBuf,
    pub log_level: String
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            batch_size: 5_000,
            max_workers: available_parallelism().map(NonZeroUsize::get).unwrap_or(1),
            output_path: PathBuf::from("recordstreams.json"),
            log_level: "error".to_string()
        }
    }
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source
        })?;

        Self::parse(&content, path.display().to_string())
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>".to_string())
    }

    fn parse(content: &str, origin: String) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content).map_err(|source| ConfigError::Parse { path: origin, source })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [("chunk_size", self.chunk_size), ("batch_size", self.batch_size), ("max_workers", self.max_workers)];

        match sizes.into_iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(ConfigError::Invalid { field }),
            None => Ok(())
        }
    }
}
