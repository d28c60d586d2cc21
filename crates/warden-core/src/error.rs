//! Gateway error types.

use thiserror::Error;

/// Errors surfaced by platform capabilities.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Sending a message failed.
    #[error("failed to send message: {0}")]
    SendFailed(String),

    /// Deleting a message failed.
    #[error("failed to delete message: {0}")]
    DeleteFailed(String),

    /// The session is no longer connected.
    #[error("gateway is not connected")]
    NotConnected,
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
