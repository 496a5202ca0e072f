//! Entity-Component System (ECS) functionality
//!
//! Stage content is stored as hecs entities tagged with an [`EntityKind`];
//! behavior is selected by that tag rather than by a type hierarchy.

pub mod components;
pub mod world;

// Re-export commonly used types
pub use components::{
    EntityKind, Name, ShadowCaster, ShadowReceiver, Transform, Visible,
};
pub use world::World;

// Re-export hecs types that users will need
pub use hecs::Entity;
