//! Render/physics engine host interface

use crate::core::camera::CameraId;
use crate::physics::{ImpostorParams, ShapeKind};
use hecs::Entity;
use tracing::trace;

/// Identifier of the render surface cameras attach their input to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u32);

impl SurfaceId {
    /// The main window's canvas
    pub const PRIMARY: SurfaceId = SurfaceId(0);
}

/// Operations the stage core consumes from the render/physics engine
///
/// Implementations are driven from the main loop thread only.
pub trait RenderHost {
    /// Create the physics proxy for a mesh
    fn create_impostor(&mut self, entity: Entity, shape: ShapeKind, params: ImpostorParams);

    /// Route pointer/keyboard control of the surface to a camera
    fn attach_control(&mut self, camera: CameraId, surface: SurfaceId);

    /// Stop routing input to a camera
    fn detach_control(&mut self, camera: CameraId, surface: SurfaceId);

    /// Make a camera the one the renderer draws from
    fn set_active_camera(&mut self, camera: CameraId);

    /// Show or hide a mesh
    fn set_mesh_visible(&mut self, entity: Entity, visible: bool);
}

/// A call received by a [`HeadlessHost`]
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CreateImpostor {
        entity: Entity,
        shape: ShapeKind,
        params: ImpostorParams,
    },
    AttachControl {
        camera: CameraId,
        surface: SurfaceId,
    },
    DetachControl {
        camera: CameraId,
        surface: SurfaceId,
    },
    SetActiveCamera(CameraId),
    SetMeshVisible {
        entity: Entity,
        visible: bool,
    },
}

/// Host without a renderer that records every call it receives
#[derive(Debug, Default)]
pub struct HeadlessHost {
    calls: Vec<HostCall>,
}

impl HeadlessHost {
    /// Create a host with an empty call log
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls received so far, oldest first
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Drain the call log
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of impostors created
    pub fn impostor_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, HostCall::CreateImpostor { .. }))
            .count()
    }

    /// Impostor parameters created for an entity
    pub fn impostor_for(&self, entity: Entity) -> Option<ImpostorParams> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::CreateImpostor {
                entity: target,
                params,
                ..
            } if *target == entity => Some(*params),
            _ => None,
        })
    }

    /// Cameras currently attached to input, replayed from the call log
    pub fn attached_cameras(&self) -> Vec<CameraId> {
        let mut attached = Vec::new();
        for call in &self.calls {
            match call {
                HostCall::AttachControl { camera, .. } => {
                    if !attached.contains(camera) {
                        attached.push(*camera);
                    }
                }
                HostCall::DetachControl { camera, .. } => attached.retain(|c| c != camera),
                _ => {}
            }
        }
        attached
    }

    /// Camera most recently made active
    pub fn active_camera(&self) -> Option<CameraId> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::SetActiveCamera(camera) => Some(*camera),
            _ => None,
        })
    }

    fn record(&mut self, call: HostCall) {
        trace!(call = ?call, "Host call");
        self.calls.push(call);
    }
}

impl RenderHost for HeadlessHost {
    fn create_impostor(&mut self, entity: Entity, shape: ShapeKind, params: ImpostorParams) {
        self.record(HostCall::CreateImpostor {
            entity,
            shape,
            params,
        });
    }

    fn attach_control(&mut self, camera: CameraId, surface: SurfaceId) {
        self.record(HostCall::AttachControl { camera, surface });
    }

    fn detach_control(&mut self, camera: CameraId, surface: SurfaceId) {
        self.record(HostCall::DetachControl { camera, surface });
    }

    fn set_active_camera(&mut self, camera: CameraId) {
        self.record(HostCall::SetActiveCamera(camera));
    }

    fn set_mesh_visible(&mut self, entity: Entity, visible: bool) {
        self.record(HostCall::SetMeshVisible { entity, visible });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attached_cameras_replay() {
        let mut host = HeadlessHost::new();
        host.attach_control(CameraId(1), SurfaceId::PRIMARY);
        host.attach_control(CameraId(2), SurfaceId::PRIMARY);
        host.detach_control(CameraId(1), SurfaceId::PRIMARY);

        assert_eq!(host.attached_cameras(), vec![CameraId(2)]);
    }

    #[test]
    fn test_active_camera_is_latest() {
        let mut host = HeadlessHost::new();
        assert_eq!(host.active_camera(), None);

        host.set_active_camera(CameraId(3));
        host.set_active_camera(CameraId(4));
        assert_eq!(host.active_camera(), Some(CameraId(4)));

        assert_eq!(host.take_calls().len(), 2);
        assert!(host.calls().is_empty());
    }
}
