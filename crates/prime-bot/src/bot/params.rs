use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tunable weights for the residual-hand score.
///
/// Lower scores are better. Values were tuned against round-robin play and
/// can be replaced from a JSON file produced by an external optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyParams {
    /// Added when even-like cards outnumber odd tails by more than 3:2 (default: 1_000_000)
    #[serde(default = "default_even_overflow")]
    pub even_overflow: i64,

    /// Per-card cost of keeping each digit; higher means spend it sooner
    /// (default: [10, 2, 6, 1, 9, 4, 8, 1, 7, 2])
    #[serde(default = "default_weakness")]
    pub weakness: [i64; 10],
}

impl Default for PenaltyParams {
    fn default() -> Self {
        Self {
            even_overflow: default_even_overflow(),
            weakness: default_weakness(),
        }
    }
}

fn default_even_overflow() -> i64 {
    1_000_000
}

fn default_weakness() -> [i64; 10] {
    [10, 2, 6, 1, 9, 4, 8, 1, 7, 2]
}

impl PenaltyParams {
    /// Load parameters from a JSON file. Unknown keys are ignored.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParamsError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ParamsError::Read {
            source,
            path: path.to_path_buf(),
        })?;
        let params = Self::from_json(&contents).map_err(|source| ParamsError::Parse {
            source,
            path: path.to_path_buf(),
        })?;
        params.validate().map_err(|message| ParamsError::Invalid {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(params)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.even_overflow < 0 {
            return Err(format!(
                "even_overflow must not be negative, got {}",
                self.even_overflow
            ));
        }
        if let Some((digit, weight)) = self.weakness.iter().enumerate().find(|(_, w)| **w < 0) {
            return Err(format!("weakness[{digit}] must not be negative, got {weight}"));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("failed to read params {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse params {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("invalid params in {path:?}: {message}")]
    Invalid { path: PathBuf, message: String },
}

pub const DEFAULT_WIN_NODE_LIMIT: usize = 1_000;
pub const DEFAULT_SHUFFLE_BUDGET: usize = 1_000;

/// Iteration caps for the bounded searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Frontier pops before the win-sequence search gives up.
    pub win_node_limit: usize,
    /// Reshuffles of the odd tail tried by the massive-length solver.
    pub shuffle_budget: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            win_node_limit: DEFAULT_WIN_NODE_LIMIT,
            shuffle_budget: DEFAULT_SHUFFLE_BUDGET,
        }
    }
}

impl SearchLimits {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `PRIME_WIN_NODE_LIMIT` / `PRIME_SHUFFLE_BUDGET`.
    pub fn from_reader<F>(read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        Self::default().overridden_by(read)
    }

    /// Replace each limit whose variable holds a positive integer; anything
    /// else keeps the current value.
    pub fn overridden_by<F>(self, mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let win_node_limit = read("PRIME_WIN_NODE_LIMIT")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(self.win_node_limit);
        let shuffle_budget = read("PRIME_SHUFFLE_BUDGET")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(self.shuffle_budget);
        Self {
            win_node_limit,
            shuffle_budget,
        }
    }
}
