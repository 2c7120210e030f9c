//! # deskbridge-protocol
//!
//! Wire contract between the two ends of the deskbridge input bridge:
//! the capture side (macOS) and the replay side (Windows). Both ends
//! must produce and consume identical byte sequences.
//!
//! ## Wire format
//!
//! ```text
//! [len: 4, big-endian u32][payload: variable]
//!                          msgpack-encoded Frame { sequence, event }
//! ```
//!
//! TCP delivers partial and coalesced frames, so the receive path goes
//! through [`FrameDecoder`], which buffers input until a complete frame
//! is available.
//!
//! ## Example
//!
//! ```rust
//! use deskbridge_protocol::{Frame, FrameDecoder, InputEvent};
//!
//! let frame = Frame::new(1, InputEvent::Ping);
//! let encoded = frame.encode().unwrap();
//!
//! let mut decoder = FrameDecoder::new();
//! decoder.push(&encoded);
//! let decoded = decoder.next_frame().unwrap().unwrap();
//! assert_eq!(decoded.sequence, 1);
//! ```

pub mod event;
pub mod wire;

pub use event::{
    GestureEvent, GestureType, InputEvent, KeyboardEvent, Modifiers, MouseButton,
    MouseButtonEvent, MouseMoveEvent, MouseScrollEvent, WindowsModifiers,
};
pub use wire::{Frame, FrameDecoder, WireError, MAX_FRAME_LEN};
