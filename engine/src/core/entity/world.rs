//! World wrapper providing helper methods for entity management

use super::components::{EntityKind, Transform, Visible};
use hecs::Entity;
use tracing::debug;

/// Wrapper around hecs::World providing additional helper methods
pub struct World {
    inner: hecs::World,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            inner: hecs::World::new(),
        }
    }

    /// Spawn a new entity with the given components
    pub fn spawn(&mut self, components: impl hecs::DynamicBundle) -> Entity {
        self.inner.spawn(components)
    }

    /// Get a reference to a component on an entity
    pub fn get<T: hecs::Component>(
        &self,
        entity: Entity,
    ) -> Result<hecs::Ref<'_, T>, hecs::ComponentError> {
        self.inner.get::<&T>(entity)
    }

    /// Insert a component into an entity
    pub fn insert_one(
        &mut self,
        entity: Entity,
        component: impl hecs::Component,
    ) -> Result<(), hecs::NoSuchEntity> {
        self.inner.insert_one(entity, component)
    }

    /// Despawn an entity and all its components
    pub fn despawn(&mut self, entity: Entity) -> Result<(), hecs::NoSuchEntity> {
        self.inner.despawn(entity)
    }

    /// Check if an entity exists
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.contains(entity)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.inner.len() as usize
    }

    /// Whether the world holds no entities
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Count entities tagged with the given kind
    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.inner
            .query::<&EntityKind>()
            .iter()
            .filter(|(_, k)| **k == kind)
            .count()
    }

    /// World-space position of an entity, if it has a transform
    pub fn position_of(&self, entity: Entity) -> Option<glam::Vec3> {
        self.get::<Transform>(entity).ok().map(|t| t.position)
    }

    /// Set the visibility flag of an entity, adding it if missing
    pub fn set_visible(&mut self, entity: Entity, visible: bool) -> Result<(), hecs::NoSuchEntity> {
        if let Ok(flag) = self.inner.query_one_mut::<&mut Visible>(entity) {
            flag.0 = visible;
            return Ok(());
        }
        debug!(entity = ?entity, "Adding Visible component");
        self.inner.insert_one(entity, Visible(visible))
    }

    /// Whether an entity is visible; entities without the flag are visible
    pub fn is_visible(&self, entity: Entity) -> bool {
        self.get::<Visible>(entity).map(|v| v.0).unwrap_or(true)
    }
}
