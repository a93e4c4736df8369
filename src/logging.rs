//! Logging setup and the log sink used by the reconciliation pipeline.
//!
//! Two `fmt` layers share one registry:
//!
//! - terminal: stderr, no timestamps, level from `RUST_LOG` (default `info`)
//! - file: `UserData/logs/pkgfront.log`, everything at `debug` and above
//!
//! Events with target [`DETAIL_TARGET`] are file-only. They carry the full
//! sorted package lists that would drown the terminal summary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter, filter_fn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::config::{AppPaths, LOG_FILE_NAME};

/// Target of events that must never reach the terminal
pub const DETAIL_TARGET: &str = "pkgfront::detail";

/// Initialize terminal and file logging.
///
/// The returned guard flushes the file writer on drop and must be held by
/// `main` for the whole run.
pub fn init_logging(paths: &AppPaths) -> Result<WorkerGuard> {
    let log_dir = paths.logs_dir();
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let terminal = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_filter(env_filter)
        .with_filter(filter_fn(|meta| meta.target() != DETAIL_TARGET));

    let file = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(terminal)
        .with(file)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}

/// Where the pipeline sends its human-facing messages
pub trait LogSink {
    fn info(&self, message: &str);

    fn warn(&self, message: &str);

    /// Log to the file only, never the terminal
    fn detail(&self, message: &str);

    /// Path of the log file, quoted in the summary
    fn log_file(&self) -> &Path;
}

/// `LogSink` backed by the tracing subscriber installed in [`init_logging`]
#[derive(Debug, Clone)]
pub struct TracingSink {
    log_file: PathBuf,
}

impl TracingSink {
    pub fn new(log_file: impl Into<PathBuf>) -> Self {
        Self {
            log_file: log_file.into(),
        }
    }
}

impl LogSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn detail(&self, message: &str) {
        tracing::info!(target: DETAIL_TARGET, "{}", message);
    }

    fn log_file(&self) -> &Path {
        &self.log_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_sink_reports_log_file() {
        let sink = TracingSink::new("/var/log/pkgfront.log");
        assert_eq!(sink.log_file(), Path::new("/var/log/pkgfront.log"));
        // No subscriber installed: emitting must be a silent no-op
        sink.info("info");
        sink.warn("warn");
        sink.detail("detail");
    }

    #[test]
    fn test_init_logging_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(dir.path()).unwrap();
        // May fail to install if another test already set a global subscriber
        let _ = init_logging(&paths);
        assert!(paths.logs_dir().is_dir());
    }
}
