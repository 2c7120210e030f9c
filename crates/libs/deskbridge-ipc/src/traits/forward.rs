use async_trait::async_trait;
use deskbridge_protocol::InputEvent;

use crate::error::BridgeError;
use crate::types::ForwardDisposition;

/// Capture-side event injection.
#[async_trait]
pub trait BridgeForward: Send + Sync {
    /// Forward a captured event to the peer when the mode and connection
    /// allow it; otherwise report that the event stays local.
    async fn forward_event(&self, event: InputEvent)
        -> Result<ForwardDisposition, BridgeError>;
}
