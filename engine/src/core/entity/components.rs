//! Core components for the entity system

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Transform component representing position, rotation, and scale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Rotation as a quaternion
    pub rotation: Quat,
    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with the given position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the scale of the transform
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

/// What a stage entity is; selects construction and shadow behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Wall,
    Movable,
    Item,
    Bot,
    ImportedMesh,
    /// Stand-in for an imported model that failed to load
    Placeholder,
    Skybox,
    Sprite,
    Light,
}

impl EntityKind {
    /// Whether entities of this kind cast shadows
    pub fn casts_shadows(self) -> bool {
        match self {
            EntityKind::Player
            | EntityKind::Movable
            | EntityKind::Bot
            | EntityKind::ImportedMesh
            | EntityKind::Placeholder => true,
            EntityKind::Wall
            | EntityKind::Item
            | EntityKind::Skybox
            | EntityKind::Sprite
            | EntityKind::Light => false,
        }
    }

    /// Whether entities of this kind receive shadows
    pub fn receives_shadows(self) -> bool {
        matches!(self, EntityKind::Wall | EntityKind::ImportedMesh)
    }
}

/// Render visibility of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visible(pub bool);

impl Default for Visible {
    fn default() -> Self {
        Self(true)
    }
}

/// Marker for meshes registered with a shadow generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowCaster;

/// Marker for meshes that receive shadows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadowReceiver;

/// Name component for entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

impl Name {
    /// Create a new name component
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_default() {
        let transform = Transform::default();
        assert_eq!(transform.position, Vec3::ZERO);
        assert_eq!(transform.rotation, Quat::IDENTITY);
        assert_eq!(transform.scale, Vec3::ONE);
    }

    #[test]
    fn test_shadow_roles() {
        assert!(EntityKind::Player.casts_shadows());
        assert!(!EntityKind::Player.receives_shadows());
        assert!(EntityKind::Wall.receives_shadows());
        assert!(!EntityKind::Wall.casts_shadows());
        assert!(EntityKind::ImportedMesh.casts_shadows());
        assert!(EntityKind::ImportedMesh.receives_shadows());
        assert!(!EntityKind::Skybox.casts_shadows());
    }
}
