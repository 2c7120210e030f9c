//! # deskbridge-client
//!
//! The client-side core of the deskbridge input bridge: session state,
//! transport connector, and the command dispatcher a presentation shell
//! drives through the `deskbridge-ipc` boundary.
//!
//! The shell issues four operations (connect, disconnect, toggle mode,
//! snapshot) and polls the snapshot every two seconds. Everything else,
//! from dialing with a bounded timeout to keepalive and loss detection,
//! happens in the connector's background tasks, so no command blocks
//! past the point where its outcome is known.

mod bridge;
pub mod config;
mod connector;
mod session;

pub use bridge::ForwardBridge;
pub use config::ClientConfig;
