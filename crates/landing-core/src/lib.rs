#![forbid(unsafe_code)]

//! Core: page events, geometry, the host-driven clock, notification seam, and logging.

pub mod clock;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod notify;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, warn};
