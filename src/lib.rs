// CommandState Library - Public API

// Re-export error types
pub mod error;
pub use error::{CommandStateError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use core::config::MonitorConfig;

use std::fs::{File, OpenOptions};
use std::path::Path;

/// Initialize logging.
///
/// The TUI owns the terminal, so records go to `log_file` when one is
/// given. Without a file, logging stays off unless `RUST_LOG` is set.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    match log_file {
        Some(path) => {
            builder
                .filter_level(log::LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(open_log_file(path)?)));
        }
        None if std::env::var_os("RUST_LOG").is_some() => {
            builder.parse_default_env();
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }

    builder
        .try_init()
        .map_err(|e| CommandStateError::other(format!("Failed to initialize logging: {}", e)))
}

/// Open `path` for appending, creating it if needed
pub fn open_log_file(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
