//! Tracing setup.
//!
//! Logs go to a file in the data directory; the terminal itself belongs to
//! the renderer. `RUST_LOG` overrides the configured level.

use crate::domain::error::Result;
use crate::infrastructure::paths;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber, appending to
/// `<data_dir>/sds-console.log`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init_tracing(level: &str) -> Result<()> {
    let path = paths::log_file();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| crate::domain::error::ConsoleError::Config(format!(
            "failed to install tracing subscriber: {e}"
        )))?;

    tracing::debug!(log = %path.display(), "tracing initialized");
    Ok(())
}
