//! Feature-gated logging macros.
//!
//! With the `tracing` feature enabled these are the real `tracing` macros,
//! and the crate emits structured events for buffer recording, replay
//! passes (begin, supersede, complete), and pan/zoom updates. Without the
//! feature every call site compiles to nothing, so embedding hosts that do
//! not install a subscriber pay no logging cost.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

/// No-op stand-in for `tracing::debug!` when the feature is off.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

/// No-op stand-in for `tracing::warn!` when the feature is off.
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
