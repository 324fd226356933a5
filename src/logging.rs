use anyhow::Result;
use chrono::Local;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::utils::app_paths::AppPaths;

/// Initialize tracing with a per-day log file under the app data dir.
/// Logs go to the file rather than stdout so they never interleave with
/// the rendered table.
pub fn init_tracing() -> Result<()> {
    let log_dir = AppPaths::log_dir()?;
    let log_file = log_dir.join(format!("student-cli_{}.log", Local::now().format("%Y%m%d")));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(Arc::new(file))
        .with_target(true)
        .with_ansi(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!(target: "system", "Logging to {}", log_file.display());
    Ok(())
}
