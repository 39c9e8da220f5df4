use prime_bot::bot::{DEFAULT_SHUFFLE_BUDGET, DEFAULT_WIN_NODE_LIMIT};
use prime_bot::{PenaltyParams, SearchLimits};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Player configuration loaded from YAML. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Seed for the constructive solvers; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub params: PenaltyParams,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: ClientConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.params
            .validate()
            .map_err(|message| ValidationError::InvalidField {
                field: "params".to_string(),
                message,
            })?;
        self.search.validate()?;
        self.logging.normalize();
        self.logging.validate()?;
        Ok(())
    }
}

/// Iteration caps for the bounded searches.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct SearchConfig {
    #[serde(default = "default_win_node_limit")]
    pub win_node_limit: usize,
    #[serde(default = "default_shuffle_budget")]
    pub shuffle_budget: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            win_node_limit: DEFAULT_WIN_NODE_LIMIT,
            shuffle_budget: DEFAULT_SHUFFLE_BUDGET,
        }
    }
}

impl SearchConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.win_node_limit == 0 {
            return Err(ValidationError::InvalidField {
                field: "search.win_node_limit".to_string(),
                message: "node limit must be greater than zero".to_string(),
            });
        }

        if self.shuffle_budget == 0 {
            return Err(ValidationError::InvalidField {
                field: "search.shuffle_budget".to_string(),
                message: "shuffle budget must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            win_node_limit: self.win_node_limit,
            shuffle_budget: self.shuffle_budget,
        }
    }
}

fn default_win_node_limit() -> usize {
    DEFAULT_WIN_NODE_LIMIT
}

fn default_shuffle_budget() -> usize {
    DEFAULT_SHUFFLE_BUDGET
}

/// Logging is off unless enabled here or forced from the command line.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    /// JSON log file; stderr when unset.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            tracing_level: default_tracing_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
