//! Process-wide session record.
//!
//! One instance exists per client, behind a single `std::sync::Mutex`.
//! Every read is a whole-record snapshot under that lock, so the polling
//! shell never observes a half-updated status/mode pair. Status and
//! endpoint are written only by the connector; the mode only by the
//! dispatcher's toggle.

use deskbridge_ipc::{Endpoint, Mode, SessionStatus, StateSnapshot};
use tokio_util::sync::CancellationToken;

pub(crate) struct Session {
    status: SessionStatus,
    endpoint: Option<Endpoint>,
    mode: Mode,
    sequence: u64,
    last_error: Option<String>,
    /// Cancellation handle for the in-flight connect attempt. Registered
    /// and cancelled under the session lock, atomically with the status
    /// it belongs to.
    attempt: Option<CancellationToken>,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            status: SessionStatus::Disconnected,
            endpoint: None,
            mode: Mode::MacOS,
            sequence: 0,
            last_error: None,
            attempt: None,
        }
    }

    pub(crate) fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub(crate) fn endpoint_display(&self) -> Option<String> {
        self.endpoint.as_ref().map(Endpoint::to_string)
    }

    pub(crate) fn toggle_mode(&mut self) -> Mode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Next outbound frame sequence. Strictly increasing for the
    /// lifetime of the session.
    pub(crate) fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    /// Whether captured events leave the local machine.
    pub(crate) fn should_forward(&self) -> bool {
        self.mode == Mode::Windows && self.status.is_connected()
    }

    /// Claim the single Connecting slot.
    pub(crate) fn begin_attempt(&mut self, endpoint: Endpoint, cancel: CancellationToken) {
        self.status = SessionStatus::Connecting;
        self.endpoint = Some(endpoint);
        self.last_error = None;
        self.attempt = Some(cancel);
    }

    /// Cancel the in-flight attempt, if any.
    pub(crate) fn cancel_attempt(&mut self) {
        if let Some(token) = self.attempt.take() {
            token.cancel();
        }
    }

    /// The attempt dialed successfully and the link is live.
    pub(crate) fn establish(&mut self) {
        self.attempt = None;
        if self.status.is_connecting() {
            self.status = SessionStatus::Connected;
        }
    }

    /// The attempt failed. Rests at `Disconnected`: the caller already
    /// received the error synchronously, and the snapshot keeps the
    /// reason in `last_error`. No-op if a disconnect already reset the
    /// session.
    pub(crate) fn fail_attempt(&mut self, reason: String) {
        self.attempt = None;
        if self.status.is_connecting() {
            self.status = SessionStatus::Disconnected;
            self.last_error = Some(reason);
        }
    }

    /// An established link died underneath us. Rests at `Error` so the
    /// polling shell can surface the reason; cleared by the next
    /// connect or disconnect command.
    pub(crate) fn mark_lost(&mut self, reason: String) {
        if self.status.is_connected() {
            self.last_error = Some(reason.clone());
            self.status = SessionStatus::Error(reason);
        }
    }

    /// Explicit disconnect: back to a clean `Disconnected` from any
    /// state. The mode survives; the sequence counter keeps counting.
    pub(crate) fn reset(&mut self) {
        self.cancel_attempt();
        self.status = SessionStatus::Disconnected;
        self.endpoint = None;
        self.last_error = None;
    }

    pub(crate) fn snapshot(&self) -> StateSnapshot {
        let mut snapshot = StateSnapshot::default();
        snapshot.mode = self.mode;
        snapshot.status = self.status.clone();
        snapshot.endpoint = self.endpoint_display();
        snapshot.last_error = self.last_error.clone();
        snapshot.sequence = self.sequence;
        snapshot
    }
}
