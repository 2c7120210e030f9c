use async_trait::async_trait;
use deskbridge_protocol::InputEvent;

use crate::error::BridgeError;
use crate::traits::*;
use crate::types::*;

/// A bridge implementation that fails every command with `NotImplemented`.
///
/// The starting point for shells built before the core: wire it behind
/// the RPC layer, then swap in the real client. The snapshot query
/// reports a freshly started, disconnected session so polling loops can
/// run against it unchanged.
pub struct StubBridge;

#[async_trait]
impl BridgeControl for StubBridge {
    async fn connect(&self, _host: &str, _port: u16) -> Result<String, BridgeError> {
        Err(BridgeError::not_implemented("connect"))
    }

    async fn disconnect(&self) -> Result<(), BridgeError> {
        Err(BridgeError::not_implemented("disconnect"))
    }

    async fn toggle_mode(&self) -> Result<Mode, BridgeError> {
        Err(BridgeError::not_implemented("toggle_mode"))
    }
}

#[async_trait]
impl BridgeStatus for StubBridge {
    async fn state(&self) -> StateSnapshot {
        StateSnapshot::default()
    }
}

#[async_trait]
impl BridgeForward for StubBridge {
    async fn forward_event(
        &self,
        _event: InputEvent,
    ) -> Result<ForwardDisposition, BridgeError> {
        Err(BridgeError::not_implemented("forward_event"))
    }
}
