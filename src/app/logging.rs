//! File logging 📜
//!
//! The terminal belongs to the board, so logs go to a daily-rolling file
//! under the cache dir instead.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("singboard")
        .join("logs")
}

/// Install the global subscriber. Keep the guard alive for as long as logs
/// should be flushed.
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init(default_filter: &str) -> anyhow::Result<WorkerGuard> {
    let dir = get_log_dir();
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::daily(&dir, "singboard.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(guard)
}
