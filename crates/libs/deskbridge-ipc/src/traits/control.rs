use async_trait::async_trait;

use crate::error::BridgeError;
use crate::types::Mode;

/// Connection and mode commands issued by the shell.
#[async_trait]
pub trait BridgeControl: Send + Sync {
    /// Connect to the replay server at `host:port`.
    ///
    /// Blocks only until the attempt resolves, not for the lifetime of
    /// the connection. Returns a human-readable confirmation the shell
    /// displays verbatim. Rejects a call while already connected with
    /// `AlreadyConnected` and while an attempt is in flight with
    /// `ConnectInProgress`.
    async fn connect(&self, host: &str, port: u16) -> Result<String, BridgeError>;

    /// Tear down any active connection, cancelling an in-flight attempt
    /// if one exists. Succeeds when already disconnected.
    async fn disconnect(&self) -> Result<(), BridgeError>;

    /// Flip the input mode and return the new value. Takes effect for
    /// the next forwarded event without a reconnect.
    async fn toggle_mode(&self) -> Result<Mode, BridgeError>;
}
