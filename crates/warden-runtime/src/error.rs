//! Runtime and configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The configuration could not be parsed or extracted.
    #[error("failed to load configuration: {0}")]
    Parse(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can terminate the runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Startup configuration failed to load.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The settings document failed to load or persist.
    #[error(transparent)]
    Settings(#[from] warden_engine::SettingsError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
