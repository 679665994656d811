use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use super::config::ConfigError;

/// Sends logs to `path`, since the terminal itself belongs to the UI.
/// `RUST_LOG` overrides the default filter.
pub fn init_file_logger(path: &Path, verbose: bool) -> Result<(), ConfigError> {
    let file = open_log_file(path)?;

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bcrisk=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bcrisk=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false),
        )
        .init();

    Ok(())
}

/// Opens the log file for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> Result<File, ConfigError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ConfigError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}
