//! Physics parameter resolution
//!
//! Simulation stepping belongs to the engine host. This module turns a
//! declarative [`PhysicsPreset`] and a shape's volume into the parameters of
//! the host's impostor (its simulatable proxy for a mesh).

pub mod components;
pub mod preset;
pub mod resolver;

// Re-export commonly used types
pub use components::{Impostor, ShapeKind};
pub use preset::{presets, PhysicsPreset, PhysicsState};
pub use resolver::{resolve, ImpostorParams, PhysicsConfigError, PhysicsPropertyResolver};
