//! Engine error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::authority::NotAuthorisedError;

/// Errors from loading or persisting the settings document.
///
/// `Read` and `Malformed` occur at load time and are fatal during startup.
/// `Write` occurs during [`save`](crate::store::SettingsStore::save) and is
/// recoverable: it is logged and the caller decides whether to retry (no
/// automatic retry exists).
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Read {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file contains invalid JSON.
    #[error("settings file {path} is malformed: {source}")]
    Malformed {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// The in-memory snapshot could not be serialized.
    #[error("failed to serialize settings snapshot: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Writing the settings file failed.
    #[error("failed to write settings file {path}: {source}")]
    Write {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Result type for settings-store operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Failures raised by command handlers, contained at the dispatch boundary.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The acting user may not run this privileged command.
    #[error(transparent)]
    NotAuthorised(#[from] NotAuthorisedError),

    /// Persisting the settings snapshot failed after a mutation.
    #[error(transparent)]
    Persistence(#[from] SettingsError),

    /// Any other failure inside a handler.
    #[error("{0}")]
    Failed(String),
}

impl CommandError {
    /// Creates a generic handler failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Result type for command handlers.
pub type CommandResult = Result<(), CommandError>;
