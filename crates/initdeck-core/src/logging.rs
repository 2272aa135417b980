//! Logging configuration using tracing

use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/initdeck/logs/` since the TUI owns
/// the terminal. Log level is controlled by the `INITDECK_LOG` environment
/// variable.
///
/// # Examples
/// ```bash
/// INITDECK_LOG=debug initdeck
/// INITDECK_LOG=trace initdeck list --status
/// ```
pub fn init() -> Result<()> {
    init_in(&log_directory())
}

/// Initialize logging into `log_dir`, creating it if needed.
///
/// Fails without installing anything when the directory cannot be created.
pub fn init_in(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "initdeck.log");

    // Default to info, allow override via INITDECK_LOG
    let env_filter = EnvFilter::try_from_env("INITDECK_LOG")
        .unwrap_or_else(|_| EnvFilter::new("initdeck=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("initdeck starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// `<data local dir>/initdeck/logs`
pub fn log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("initdeck").join("logs")
}
