use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Keeps the file writer flushing until the session ends.
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
    pub log_path: Option<PathBuf>,
}

/// Install the global subscriber. Stdout carries the protocol, so events go
/// to stderr or to the configured JSON file.
pub fn init_logging(logging: &LoggingConfig, verbose: bool) -> Result<Option<LoggingGuard>> {
    if !logging.enabled && !verbose {
        return Ok(None);
    }

    let level = if verbose {
        Level::DEBUG
    } else {
        logging.level().unwrap_or(Level::INFO)
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let Some(log_path) = logging.file.clone() else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .finish();
        // Ignore error if a global subscriber is already set (e.g., when running in tests)
        let _ = tracing::subscriber::set_global_default(subscriber);
        return Ok(Some(LoggingGuard {
            _guard: None,
            log_path: None,
        }));
    };

    if let Some(dir) = log_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory at {}", dir.display()))?;
    }
    let file = File::create(&log_path)
        .with_context(|| format!("creating log file at {}", log_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(LoggingGuard {
        _guard: Some(guard),
        log_path: Some(log_path),
    }))
}
