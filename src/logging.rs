//! Logging setup for the command-line tool.
//!
//! Logs go to stderr, and optionally to a daily-rotating file. The library
//! itself only emits `tracing` events; installing a subscriber is up to the
//! binary.
//!
//! ## Levels
//!
//! - default: `warn`
//! - `-v`: `info`
//! - `-vv` and up: `debug`
//!
//! `RUST_LOG` overrides the verbosity flags.
//!
//! ```no_run
//! use typed_columns::logging;
//!
//! logging::init(1, None).expect("Failed to initialize logging");
//! tracing::info!("ready");
//! ```

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

const LOG_FILE_PREFIX: &str = "typed-columns";

/// Gets the default log directory based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/typed-columns/logs`
/// - macOS: `~/Library/Application Support/typed-columns/logs`
/// - Linux: `~/.local/share/typed-columns/logs`
///
/// # Errors
///
/// Returns error if the data directory is unknown or cannot be created
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = base_dir.join("typed-columns").join("logs");
    ensure_dir(&log_dir)?;
    Ok(log_dir)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Level used when `RUST_LOG` is not set.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Installs the global subscriber.
///
/// With `log_dir` set, every event is also written to
/// `<log_dir>/typed-columns.<date>.log`, rotated daily, keeping 10 files.
///
/// # Errors
///
/// Returns error if the log directory or file appender cannot be created, or
/// a global subscriber is already installed
pub fn init(verbosity: u8, log_dir: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level(verbosity)))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_line_number(verbosity > 1)
        .with_writer(std::io::stderr);

    let file_layer = match log_dir {
        Some(dir) => {
            ensure_dir(dir)?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .max_log_files(10)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix("log")
                .build(dir)
                .context("Failed to create log file appender")?;
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_ansi(false)
                    .with_writer(appender),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(dir) = log_dir {
        tracing::info!("Logging to {}", current_log_path(dir).display());
    }
    Ok(())
}

/// Path of today's log file inside `log_dir`.
pub fn current_log_path(log_dir: &Path) -> PathBuf {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    log_dir.join(format!("{LOG_FILE_PREFIX}.{today}.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(5), "debug");
    }

    #[test]
    fn test_current_log_path() {
        let path = current_log_path(Path::new("/tmp/logs"));
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .expect("file name");
        assert!(name.starts_with("typed-columns."));
        assert!(name.ends_with(".log"));
        assert!(path.starts_with("/tmp/logs"));
    }
}
