//! Framed wire codec for bridge traffic.
//!
//! Each frame on the wire is a 4-byte big-endian length prefix followed
//! by a msgpack-encoded [`Frame`]. The prefix is validated against
//! [`MAX_FRAME_LEN`] before any payload is buffered.

use serde::{Deserialize, Serialize};

use crate::event::InputEvent;

/// Upper bound on a single encoded frame payload.
pub const MAX_FRAME_LEN: usize = 64 * 1024;

/// Length prefix size: 4 bytes, big-endian `u32`.
const PREFIX_LEN: usize = 4;

/// Errors from frame encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("frame payload too large: {0} bytes (maximum {MAX_FRAME_LEN})")]
    FrameTooLarge(usize),

    #[error("msgpack decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    #[error("msgpack encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
}

/// A sequenced input event, the unit of transmission across the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Per-connection sequence number, strictly increasing on the
    /// sending side. A `Pong` answers the `Ping` with the same sequence.
    pub sequence: u64,
    pub event: InputEvent,
}

impl Frame {
    pub fn new(sequence: u64, event: InputEvent) -> Self {
        Self { sequence, event }
    }

    /// Encode to a length-prefixed wire buffer.
    pub fn encode(&self) -> Result<Vec<u8>, WireError> {
        let payload = rmp_serde::to_vec(self)?;
        if payload.len() > MAX_FRAME_LEN {
            return Err(WireError::FrameTooLarge(payload.len()));
        }
        let mut buf = Vec::with_capacity(PREFIX_LEN + payload.len());
        buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }
}

/// Incremental decoder for a stream of length-prefixed frames.
///
/// TCP reads deliver partial and coalesced frames; callers push whatever
/// the transport produced and drain complete frames as they close.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes read from the transport.
    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Pop the next complete frame, or `None` when more input is needed.
    ///
    /// An oversized length prefix fails the stream before its payload is
    /// buffered; the connection is not recoverable after that.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, WireError> {
        if self.buffer.len() < PREFIX_LEN {
            return Ok(None);
        }

        let mut prefix = [0u8; PREFIX_LEN];
        prefix.copy_from_slice(&self.buffer[..PREFIX_LEN]);
        let payload_len = u32::from_be_bytes(prefix) as usize;
        if payload_len > MAX_FRAME_LEN {
            return Err(WireError::FrameTooLarge(payload_len));
        }

        if self.buffer.len() < PREFIX_LEN + payload_len {
            return Ok(None);
        }

        let frame = rmp_serde::from_slice(&self.buffer[PREFIX_LEN..PREFIX_LEN + payload_len])?;
        self.buffer.drain(..PREFIX_LEN + payload_len);
        Ok(Some(frame))
    }

    /// Bytes currently held waiting for a complete frame.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
