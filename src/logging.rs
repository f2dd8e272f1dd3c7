//! File-backed tracing setup. Stdout is left to command output.

use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

pub const LOG_FILE_NAME: &str = "pokedex.log";

/// Directory the log file is written to.
pub fn log_directory(config: &LogConfig) -> Result<PathBuf> {
  match &config.directory {
    Some(dir) => Ok(dir.clone()),
    None => dirs::data_dir()
      .map(|dir| dir.join("pokedex"))
      .ok_or_else(|| eyre!("Could not determine data directory")),
  }
}

/// `RUST_LOG` wins over the configured level.
pub fn env_filter(default_level: &str) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Install the global subscriber. Keep the guard alive until exit so buffered
/// lines are flushed.
pub fn init(config: &LogConfig) -> Result<WorkerGuard> {
  let directory = log_directory(config)?;
  ensure_directory(&directory)?;

  let appender = tracing_appender::rolling::never(&directory, LOG_FILE_NAME);
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::registry()
    .with(env_filter(&config.level))
    .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
    .try_init()
    .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

  Ok(guard)
}

fn ensure_directory(path: &Path) -> Result<()> {
  std::fs::create_dir_all(path)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", path.display(), e))
}
