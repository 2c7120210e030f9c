//! Command dispatcher: the boundary implementation the shell drives.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use deskbridge_ipc::{
    BridgeControl, BridgeError, BridgeForward, BridgeStatus, Endpoint, ForwardDisposition, Mode,
    StateSnapshot,
};
use deskbridge_protocol::InputEvent;

use crate::config::ClientConfig;
use crate::connector::{Connector, Dialer, TcpDialer};
use crate::session::Session;

/// The deskbridge client core.
///
/// Implements the full `deskbridge-ipc` boundary: validated connection
/// commands, an atomic mode toggle, cheap snapshot reads, and the
/// capture-side forwarding path. One instance exists per process,
/// created at startup and shared as `Arc<dyn Bridge>`.
pub struct ForwardBridge {
    session: Arc<Mutex<Session>>,
    connector: Connector,
}

impl ForwardBridge {
    /// Core with the production TCP dialer.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_dialer(config, Arc::new(TcpDialer))
    }

    pub(crate) fn with_dialer(config: ClientConfig, dialer: Arc<dyn Dialer>) -> Self {
        let session = Arc::new(Mutex::new(Session::new()));
        let connector = Connector::new(config, session.clone(), dialer);
        Self { session, connector }
    }
}

#[async_trait]
impl BridgeControl for ForwardBridge {
    async fn connect(&self, host: &str, port: u16) -> Result<String, BridgeError> {
        // The shell passes user input through unvalidated.
        let endpoint = Endpoint::new(host, port)?;
        self.connector.connect(endpoint.clone()).await?;
        log::info!("connected to {endpoint}");
        Ok(format!("Connected to {endpoint}"))
    }

    async fn disconnect(&self) -> Result<(), BridgeError> {
        self.connector.disconnect().await;
        log::info!("disconnected");
        Ok(())
    }

    async fn toggle_mode(&self) -> Result<Mode, BridgeError> {
        let mode = self.session.lock().expect("session mutex poisoned").toggle_mode();
        log::info!("input mode switched to {mode}");
        Ok(mode)
    }
}

#[async_trait]
impl BridgeStatus for ForwardBridge {
    async fn state(&self) -> StateSnapshot {
        self.session.lock().expect("session mutex poisoned").snapshot()
    }
}

#[async_trait]
impl BridgeForward for ForwardBridge {
    async fn forward_event(
        &self,
        event: InputEvent,
    ) -> Result<ForwardDisposition, BridgeError> {
        // The gate reads the mode at send time, so a toggle applies to
        // the very next event without a reconnect.
        if !self.session.lock().expect("session mutex poisoned").should_forward() {
            return Ok(ForwardDisposition::LocalOnly);
        }
        self.connector.queue_event(event)?;
        Ok(ForwardDisposition::Forwarded)
    }
}
