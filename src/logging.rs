//! `tracing` subscriber setup.
//!
//! `plot` logs to stderr. The dashboard owns the terminal, so it only logs
//! when given a file.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt};

use crate::error::AppError;

/// Where log lines go.
#[derive(Debug, Clone)]
pub enum LogSink {
    Stderr,
    File(PathBuf),
    Off,
}

/// Filter for `-v` count; `RUST_LOG` is only consulted without `-v`.
pub fn filter_for(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber.
pub fn init(verbose: u8, sink: LogSink) -> Result<(), AppError> {
    let filter = filter_for(verbose);

    let result = match sink {
        LogSink::Off => return Ok(()),
        LogSink::Stderr => fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init(),
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    AppError::new(2, format!("Failed to open log file '{}': {e}", path.display()))
                })?;
            fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    result.map_err(|e| AppError::new(4, format!("Failed to initialize logging: {e}")))
}
