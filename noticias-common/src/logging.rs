//! Tracing subscriber setup shared by the binaries

use crate::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Initialize the global fmt subscriber on stderr
///
/// `RUST_LOG` takes precedence; otherwise `default_level` (e.g. "info",
/// or a full directive such as "noticias_merge=debug") is used.
pub fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {}", default_level, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))
}
