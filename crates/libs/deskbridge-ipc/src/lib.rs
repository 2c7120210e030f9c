//! Boundary contract between the deskbridge core and its shells.
//!
//! This crate defines everything a presentation shell (Tauri window, TUI,
//! test harness) needs to drive the bridge without depending on the core
//! itself:
//!
//! - **Boundary types**: [`Mode`], [`SessionStatus`], [`Endpoint`], and
//!   the fixed-shape [`StateSnapshot`] the shell polls
//! - **Async trait definitions** capturing the full command surface
//! - **[`StubBridge`]** failing every command with `NotImplemented`
//! - **[`BridgeError`]**: the taxonomy shells render verbatim
//!
//! # Trait hierarchy
//!
//! Three focused traits combine into one composite:
//!
//! - [`BridgeControl`]: connect, disconnect, mode toggle
//! - [`BridgeStatus`]: the polled state snapshot
//! - [`BridgeForward`]: capture-side event injection
//! - [`Bridge`]: composite, auto-implemented for all three

pub mod error;
pub mod traits;
pub mod types;

pub use error::BridgeError;
pub use traits::{Bridge, BridgeControl, BridgeForward, BridgeStatus};
pub use types::*;

mod stub;
pub use stub::StubBridge;
