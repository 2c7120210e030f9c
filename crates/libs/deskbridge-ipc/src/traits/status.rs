use async_trait::async_trait;

use crate::types::StateSnapshot;

/// Read-only view of the session, polled by the shell on a fixed
/// interval with no backoff.
#[async_trait]
pub trait BridgeStatus: Send + Sync {
    /// A consistent snapshot of the session. A query, not a command:
    /// never fails and never mutates.
    async fn state(&self) -> StateSnapshot;
}
