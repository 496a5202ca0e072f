//! Engine context shared by every stage component

use crate::core::entity::World;
use crate::graphics::{RenderHost, SurfaceId};
use crate::input::InputState;

/// Explicit engine state passed by reference to the components that need it
///
/// One context exists per running engine. It owns the entity world, the
/// render host and the input state; nothing here is process-global.
pub struct EngineContext<H: RenderHost> {
    /// Entities of the current stage
    pub world: World,
    /// Render/physics engine the stage drives
    pub host: H,
    /// Keyboard state for camera switching
    pub input: InputState,
    /// Surface that free cameras attach their controls to
    pub surface: SurfaceId,
}

impl<H: RenderHost> EngineContext<H> {
    /// Create a context around a host, rendering to the primary surface
    pub fn new(host: H) -> Self {
        Self::with_surface(host, SurfaceId::PRIMARY)
    }

    /// Create a context rendering to a specific surface
    pub fn with_surface(host: H, surface: SurfaceId) -> Self {
        Self {
            world: World::new(),
            host,
            input: InputState::new(),
            surface,
        }
    }

    /// Drop all stage entities, keeping host and input
    pub fn reset_world(&mut self) {
        self.world = World::new();
    }
}
