//! Logging setup with `tracing` and `tracing-subscriber`.
//!
//! ```rust,ignore
//! use warden_runtime::{ConfigLoader, logging};
//!
//! let config = ConfigLoader::new().load()?;
//! logging::init_from_config(&config.logging);
//! ```
//!
//! The `RUST_LOG` environment variable takes precedence over the
//! configured level when set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};

/// Initialize logging from a [`LoggingConfig`].
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = try_init(config);
}

/// Try to initialize logging, returning an error if a global subscriber
/// is already installed.
pub fn try_init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    match config.format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(fmt::layer().compact())
            .with(filter)
            .try_init(),
        LogFormat::Full => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer().pretty())
            .with(filter)
            .try_init(),
    }
}
