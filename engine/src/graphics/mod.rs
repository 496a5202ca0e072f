//! Graphics module
//!
//! The stage core does not render. It drives an engine host through the
//! [`RenderHost`] trait: impostor creation, camera activation, input
//! attachment and mesh visibility.

pub mod host;

// Re-export commonly used types
pub use host::{HeadlessHost, HostCall, RenderHost, SurfaceId};
