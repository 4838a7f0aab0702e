//! Tracing subscriber setup.
//!
//! Logs go to stdout unless a directory is configured, in which case every run
//! writes to its own timestamped file there through a non-blocking appender.

use crate::errors::{Error, Result};
use chrono::{DateTime, Local};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::EnvFilter;

/// Log output settings
#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    /// Directory for per-run log files; stdout when absent
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// File name for a run started at `started`.
#[must_use]
pub fn log_file_name(started: DateTime<Local>) -> String {
    started
        .format("LOG_date_{%d-%m-%Y}_started_at_{%H-%M-%S}.log")
        .to_string()
}

/// Non-blocking writer for the log file of a run started at `started`, the
/// guard that flushes it, and the file's path. Creates `directory` if needed.
///
/// # Errors
/// Returns an error if the directory or the file cannot be created.
pub fn file_writer(
    directory: &Path,
    started: DateTime<Local>,
) -> Result<(NonBlocking, WorkerGuard, PathBuf)> {
    std::fs::create_dir_all(directory)?;
    let file_name = log_file_name(started);
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(&file_name)
        .build(directory)
        .map_err(|e| Error::Config {
            message: format!("Cannot create log file in {}: {e}", directory.display()),
        })?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    Ok((writer, guard, directory.join(file_name)))
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the `info` default.
///
/// With a log directory the returned guard must stay alive for as long as
/// events should reach the file.
///
/// # Errors
/// Returns an error if the log directory or file cannot be created.
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(directory) = &config.directory else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        return Ok(None);
    };

    let (writer, guard, path) = file_writer(directory, Local::now())?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    tracing::info!("Logging to {}", path.display());
    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    #[test]
    fn test_log_file_name_format() {
        let started = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(
            log_file_name(started),
            "LOG_date_{07-03-2024}_started_at_{09-05-02}.log"
        );
    }

    #[test]
    fn test_file_writer_flushes_on_guard_drop() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let logs = dir.path().join("logs");
        let started = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();

        let (mut writer, guard, path) = file_writer(&logs, started)?;
        assert_eq!(path, logs.join(log_file_name(started)));
        writer.write_all(b"bot started\n")?;
        drop(guard);

        assert_eq!(std::fs::read_to_string(&path)?, "bot started\n");
        Ok(())
    }
}
