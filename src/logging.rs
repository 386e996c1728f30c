use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Daily-rotated log file under `log_dir`. The terminal is left alone so the
/// TUI is never drawn over. Level comes from `RUST_LOG`, default `finguard=info`.
///
/// Keep the returned guard alive for the life of the program; dropping it
/// flushes and stops the writer.
pub(crate) fn init(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "finguard.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finguard=info".into()),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    info!(log_dir = %log_dir.display(), "logging initialised");
    Ok(guard)
}
