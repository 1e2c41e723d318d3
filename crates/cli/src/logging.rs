//! Tracing setup.
//!
//! Human-readable events go to stderr; the batch additionally writes JSON
//! events to `<log_dir>/results_<YYYYmmdd_HHMMSS>.log`. `RUST_LOG` overrides
//! the level picked from the `debug` setting.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Log file name for a run started at `timestamp`.
pub fn log_file_name(timestamp: chrono::DateTime<chrono::Local>) -> String {
    format!("results_{}.log", timestamp.format("%Y%m%d_%H%M%S"))
}

fn filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }))
}

/// Install the stderr and JSON file layers, returning the log file path.
pub fn init(log_dir: &Path, debug: bool) -> io::Result<PathBuf> {
    let path = log_dir.join(log_file_name(chrono::Local::now()));
    let file = File::create(&path)?;

    tracing_subscriber::registry()
        .with(filter(debug))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .with(tracing_subscriber::fmt::layer().json().with_writer(Mutex::new(file)))
        .init();

    Ok(path)
}

/// Install only the stderr layer.
pub fn init_stderr(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
