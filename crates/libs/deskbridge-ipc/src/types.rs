use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

// ── Mode ──────────────────────────────────────────────────────────────────────

/// Where captured input goes.
///
/// The mode is defined at all times and survives connection changes:
/// toggling while disconnected succeeds and takes effect on the next
/// connect. Serializes as `"MacOS"` / `"Windows"`, the spelling the
/// shell matches on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Input stays on the local machine.
    #[default]
    MacOS,
    /// Input is forwarded across the bridge.
    Windows,
}

impl Mode {
    /// The other mode. Applying this twice returns the original value.
    pub fn toggled(self) -> Self {
        match self {
            Self::MacOS => Self::Windows,
            Self::Windows => Self::MacOS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MacOS => "MacOS",
            Self::Windows => "Windows",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Session status ────────────────────────────────────────────────────────────

/// Connection lifecycle state.
///
/// Serialized adjacently tagged so the polled record keeps a fixed
/// shape: `{"kind": "Connected"}`, `{"kind": "Error", "reason": "..."}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason")]
pub enum SessionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// An established connection was lost. Rests here until the next
    /// connect or disconnect command.
    Error(String),
}

impl SessionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, Self::Connecting)
    }
}

// ── Endpoint ──────────────────────────────────────────────────────────────────

/// A validated `host:port` pair.
///
/// The shell performs no validation of its own, so construction is the
/// only place malformed input gets rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Validate shell-supplied values. The host must be non-empty after
    /// trimming; the port must be in `1..=65535` (the upper bound is the
    /// `u16` domain, so only zero needs rejecting).
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, BridgeError> {
        let host = host.into();
        let trimmed = host.trim();
        if trimmed.is_empty() {
            return Err(BridgeError::invalid_input("server host must not be empty"));
        }
        if port == 0 {
            return Err(BridgeError::invalid_input("server port must be in 1..=65535"));
        }
        Ok(Self { host: trimmed.to_owned(), port })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// ── State snapshot ────────────────────────────────────────────────────────────

/// Fixed-shape record the shell polls every two seconds.
///
/// `status == Connected` implies `endpoint` is set. Reads are cheap and
/// consistent: the core produces the whole record under one lock, so a
/// poll never observes a half-updated status/mode pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct StateSnapshot {
    pub mode: Mode,
    pub status: SessionStatus,
    /// `host:port` of the active or most recently attempted server.
    pub endpoint: Option<String>,
    /// Most recent connection failure, cleared by connect and disconnect.
    pub last_error: Option<String>,
    /// Frames sent so far, including keepalives.
    pub sequence: u64,
}

// ── Forwarding ────────────────────────────────────────────────────────────────

/// Outcome of a forward request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForwardDisposition {
    /// Queued for the peer. The writer assigns the sequence number at
    /// send time so wire sequences stay strictly increasing.
    Forwarded,
    /// Kept on the local machine: mode is `MacOS` or no connection is
    /// active.
    LocalOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution() {
        assert_eq!(Mode::MacOS.toggled().toggled(), Mode::MacOS);
        assert_eq!(Mode::Windows.toggled().toggled(), Mode::Windows);
    }

    #[test]
    fn endpoint_rejects_empty_host() {
        assert!(matches!(
            Endpoint::new("  ", 24800),
            Err(BridgeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn endpoint_rejects_port_zero() {
        assert!(matches!(
            Endpoint::new("192.168.1.20", 0),
            Err(BridgeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn endpoint_trims_and_displays_host_port() {
        let endpoint = Endpoint::new(" 192.168.1.20 ", 24800).expect("valid endpoint");
        assert_eq!(endpoint.to_string(), "192.168.1.20:24800");
    }

    #[test]
    fn snapshot_serializes_to_the_shell_shape() {
        let mut snapshot = StateSnapshot::default();
        snapshot.mode = Mode::Windows;
        snapshot.status = SessionStatus::Connected;
        snapshot.endpoint = Some("192.168.1.20:24800".into());
        snapshot.sequence = 12;

        let json = serde_json::to_value(&snapshot).expect("serialize snapshot");
        assert_eq!(
            json,
            serde_json::json!({
                "mode": "Windows",
                "status": { "kind": "Connected" },
                "endpoint": "192.168.1.20:24800",
                "last_error": null,
                "sequence": 12,
            })
        );
    }

    #[test]
    fn error_status_carries_its_reason() {
        let status = SessionStatus::Error("connection lost: peer closed".into());
        let json = serde_json::to_value(&status).expect("serialize status");
        assert_eq!(
            json,
            serde_json::json!({ "kind": "Error", "reason": "connection lost: peer closed" })
        );
    }
}
