use serde::{Deserialize, Serialize};

/// Errors returned by bridge operations.
///
/// Every variant renders as a single descriptive string. The shell
/// displays it verbatim next to the connect controls, so messages name
/// the endpoint or cause rather than an error code.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum BridgeError {
    #[error("not implemented: {method}")]
    NotImplemented { method: String },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("already connected to {endpoint}; disconnect first")]
    AlreadyConnected { endpoint: String },

    #[error("a connection attempt is already in progress")]
    ConnectInProgress,

    #[error("connection to {endpoint} timed out")]
    ConnectTimeout { endpoint: String },

    #[error("connection refused by {endpoint}")]
    ConnectRefused { endpoint: String },

    #[error("network unreachable trying to reach {endpoint}")]
    NetworkUnreachable { endpoint: String },

    #[error("connection attempt cancelled")]
    ConnectCancelled,

    #[error("not connected")]
    NotConnected,

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl BridgeError {
    /// Returns `true` for transient failures that may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectTimeout { .. }
                | Self::ConnectRefused { .. }
                | Self::NetworkUnreachable { .. }
                | Self::Transport { .. }
        )
    }

    /// Convenience constructor for `NotImplemented`.
    pub fn not_implemented(method: impl Into<String>) -> Self {
        Self::NotImplemented { method: method.into() }
    }

    /// Convenience constructor for `InvalidInput`.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    /// Convenience constructor for `Internal`.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}
