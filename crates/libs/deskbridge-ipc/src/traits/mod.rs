mod control;
mod forward;
mod status;

pub use control::BridgeControl;
pub use forward::BridgeForward;
pub use status::BridgeStatus;

/// Composite trait encompassing the full shell-facing boundary.
///
/// Automatically implemented for any type that implements the three
/// sub-traits. Use `Arc<dyn Bridge>` as the primary handle type.
pub trait Bridge: BridgeControl + BridgeStatus + BridgeForward {}

impl<T> Bridge for T where T: BridgeControl + BridgeStatus + BridgeForward {}
