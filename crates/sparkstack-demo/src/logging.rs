#![forbid(unsafe_code)]

//! File logging for the demo.
//!
//! The terminal is owned by the renderer, so tracing output only goes to a
//! file, and only when one is configured.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global `fmt` subscriber writing to `path`.
///
/// # Errors
///
/// Fails if the file cannot be created or a global subscriber is already set.
pub fn init_file_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}
