//! Logging system initialization
//!
//! Sets up tracing-based logging to stderr so log lines never interleave
//! with the interactive prompts and listings on stdout.

use crate::error::{DroidpinError, Result};
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system
///
/// Log level defaults to WARN for a quiet interactive surface and can be
/// raised via the `RUST_LOG` environment variable.
pub fn init_logging() -> Result<()> {
    let subscriber = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| DroidpinError::Config(e.to_string()))?;

    Ok(())
}
