//! Owns the declared camera set and switches the active camera

use super::{CameraId, CameraType, SceneCamera};
use crate::config::CameraBinding;
use crate::core::context::EngineContext;
use crate::core::entity::World;
use crate::graphics::RenderHost;
use hecs::Entity;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Camera operation failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("camera type {0:?} is not declared for this stage")]
    Unregistered(CameraType),

    #[error("camera type {0:?} cannot be locked to a mesh")]
    NotLockable(CameraType),

    #[error("camera type {0:?} is not free-control")]
    NotFreeControl(CameraType),

    #[error("a stage needs at least one camera")]
    EmptyCameraSet,
}

/// One camera instance per declared type, exactly one of them active
///
/// Only free-control cameras are attached to input, so at most one camera is
/// attached at any time.
#[derive(Debug)]
pub struct CameraMultiplexer {
    cameras: HashMap<CameraType, SceneCamera>,
    declared: Vec<CameraType>,
    active: CameraType,
    default_type: CameraType,
    player: Option<Entity>,
    bindings: Vec<CameraBinding>,
}

impl CameraMultiplexer {
    /// Build every declared camera and activate the default one
    ///
    /// A default type missing from `declared` is replaced by the first
    /// declared type.
    pub fn new<H: RenderHost>(
        ctx: &mut EngineContext<H>,
        declared: &[CameraType],
        default_type: CameraType,
        player: Option<Entity>,
        bindings: Vec<CameraBinding>,
    ) -> Result<Self, CameraError> {
        let mut unique: Vec<CameraType> = Vec::with_capacity(declared.len());
        for camera_type in declared {
            if !unique.contains(camera_type) {
                unique.push(*camera_type);
            }
        }
        let Some(&first) = unique.first() else {
            return Err(CameraError::EmptyCameraSet);
        };

        let default_type = if unique.contains(&default_type) {
            default_type
        } else {
            warn!(
                requested = ?default_type,
                fallback = ?first,
                "Default camera is not declared, using first declared camera"
            );
            first
        };

        let cameras = unique
            .iter()
            .enumerate()
            .map(|(index, camera_type)| {
                let camera = SceneCamera::new(CameraId(index as u32), *camera_type, player);
                (*camera_type, camera)
            })
            .collect();

        let multiplexer = Self {
            cameras,
            declared: unique,
            active: default_type,
            default_type,
            player,
            bindings,
        };
        multiplexer.activate(ctx, default_type);

        info!(
            cameras = multiplexer.declared.len(),
            active = ?default_type,
            "Camera system created"
        );
        Ok(multiplexer)
    }

    /// Make `camera_type` the active camera, returning the type actually active
    ///
    /// Undeclared types fall back to the default camera. Switching to the
    /// already active type does nothing.
    pub fn set_active_scene_camera<H: RenderHost>(
        &mut self,
        ctx: &mut EngineContext<H>,
        camera_type: CameraType,
    ) -> CameraType {
        let target = if self.cameras.contains_key(&camera_type) {
            camera_type
        } else {
            warn!(
                requested = ?camera_type,
                fallback = ?self.default_type,
                "Camera type not declared, falling back to default"
            );
            self.default_type
        };

        if target == self.active {
            debug!(camera = ?target, "Camera already active");
            return target;
        }

        let previous = self.active;
        if previous.is_free_control() {
            if let Some(camera) = self.cameras.get(&previous) {
                ctx.host.detach_control(camera.id, ctx.surface);
            }
        }
        self.activate(ctx, target);
        self.active = target;

        info!(from = ?previous, to = ?target, "Switched active camera");
        target
    }

    fn activate<H: RenderHost>(&self, ctx: &mut EngineContext<H>, camera_type: CameraType) {
        let Some(camera) = self.cameras.get(&camera_type) else {
            return;
        };
        ctx.host.set_active_camera(camera.id);
        if camera_type.is_free_control() {
            ctx.host.attach_control(camera.id, ctx.surface);
        }

        if let Some(player) = self.player {
            let visible = camera_type != CameraType::FirstPerson;
            if ctx.world.set_visible(player, visible).is_err() {
                warn!(player = ?player, "Tracked player no longer exists");
            }
            ctx.host.set_mesh_visible(player, visible);
        }
    }

    /// Point an existing camera at another entity, keeping its local state
    pub fn lock_to(&mut self, entity: Entity, camera_type: CameraType) -> Result<(), CameraError> {
        let camera = self
            .cameras
            .get_mut(&camera_type)
            .ok_or(CameraError::Unregistered(camera_type))?;
        camera.retarget(entity)?;
        debug!(camera = ?camera_type, entity = ?entity, "Camera locked to entity");
        Ok(())
    }

    /// Whether the first-person camera is the active one
    pub fn is_first_person_active(&self) -> bool {
        self.active == CameraType::FirstPerson
    }

    pub fn active_type(&self) -> CameraType {
        self.active
    }

    pub fn active_camera(&self) -> Option<&SceneCamera> {
        self.cameras.get(&self.active)
    }

    pub fn camera(&self, camera_type: CameraType) -> Option<&SceneCamera> {
        self.cameras.get(&camera_type)
    }

    pub fn camera_mut(&mut self, camera_type: CameraType) -> Option<&mut SceneCamera> {
        self.cameras.get_mut(&camera_type)
    }

    /// Declared camera types in declaration order
    pub fn declared(&self) -> &[CameraType] {
        &self.declared
    }

    /// Switch cameras on the first held binding key
    ///
    /// Returns the newly active type when a switch happened.
    pub fn handle_input<H: RenderHost>(
        &mut self,
        ctx: &mut EngineContext<H>,
    ) -> Option<CameraType> {
        let requested = self
            .bindings
            .iter()
            .find(|binding| ctx.input.is_pressed(binding.key))
            .map(|binding| binding.camera)?;

        let previous = self.active;
        let active = self.set_active_scene_camera(ctx, requested);
        (active != previous).then_some(active)
    }

    /// Recompute every camera from its target's current transform
    pub fn update(&mut self, world: &World) {
        for camera in self.cameras.values_mut() {
            let position = camera.target().and_then(|entity| world.position_of(entity));
            camera.update(position);
        }
    }
}
