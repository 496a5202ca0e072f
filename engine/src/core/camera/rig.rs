//! Camera types and their per-type state

use super::{CameraError, Projection};
use glam::Vec3;
use hecs::Entity;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

const FREE_START: Vec3 = Vec3::new(0.0, 15.0, -30.0);
const FREE_SPEED: f32 = 0.5;
const STATIONARY_POSITION: Vec3 = Vec3::new(0.0, 25.0, -25.0);
const FOLLOW_RADIUS: f32 = 10.0;
const FOLLOW_HEIGHT: f32 = 4.0;
const EYE_HEIGHT: f32 = 1.7;
const ARC_RADIUS: f32 = 20.0;

/// Camera behaviors a stage can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraType {
    FreeDebug,
    Stationary,
    Follow,
    FirstPerson,
    ArcRotate,
}

impl CameraType {
    /// Every camera type in declaration order
    pub const ALL: [CameraType; 5] = [
        CameraType::FreeDebug,
        CameraType::Stationary,
        CameraType::Follow,
        CameraType::FirstPerson,
        CameraType::ArcRotate,
    ];

    /// Free-control cameras take pointer/keyboard input from the surface
    pub fn is_free_control(self) -> bool {
        match self {
            CameraType::FreeDebug | CameraType::FirstPerson => true,
            CameraType::Stationary | CameraType::Follow | CameraType::ArcRotate => false,
        }
    }

    /// Short label for HUD display
    pub fn label(self) -> &'static str {
        match self {
            CameraType::FreeDebug => "free",
            CameraType::Stationary => "stationary",
            CameraType::Follow => "follow",
            CameraType::FirstPerson => "first person",
            CameraType::ArcRotate => "orbit",
        }
    }
}

/// Host-facing identifier of a camera instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraId(pub u32);

/// Per-type camera state
#[derive(Debug, Clone, PartialEq)]
pub enum CameraRig {
    FreeDebug {
        position: Vec3,
        yaw: f32,
        pitch: f32,
        speed: f32,
    },
    Stationary {
        position: Vec3,
        target: Option<Entity>,
    },
    Follow {
        target: Option<Entity>,
        radius: f32,
        height_offset: f32,
    },
    FirstPerson {
        anchor: Option<Entity>,
        eye_height: f32,
    },
    ArcRotate {
        target: Option<Entity>,
        alpha: f32,
        beta: f32,
        radius: f32,
    },
}

impl CameraRig {
    /// Default rig for a camera type, tracking `target` where the type tracks
    pub fn new(camera_type: CameraType, target: Option<Entity>) -> Self {
        match camera_type {
            CameraType::FreeDebug => CameraRig::FreeDebug {
                position: FREE_START,
                yaw: 0.0,
                pitch: 0.0,
                speed: FREE_SPEED,
            },
            CameraType::Stationary => CameraRig::Stationary {
                position: STATIONARY_POSITION,
                target,
            },
            CameraType::Follow => CameraRig::Follow {
                target,
                radius: FOLLOW_RADIUS,
                height_offset: FOLLOW_HEIGHT,
            },
            CameraType::FirstPerson => CameraRig::FirstPerson {
                anchor: target,
                eye_height: EYE_HEIGHT,
            },
            CameraType::ArcRotate => CameraRig::ArcRotate {
                target,
                alpha: -FRAC_PI_2,
                beta: FRAC_PI_3,
                radius: ARC_RADIUS,
            },
        }
    }

    /// The type this rig implements
    pub fn camera_type(&self) -> CameraType {
        match self {
            CameraRig::FreeDebug { .. } => CameraType::FreeDebug,
            CameraRig::Stationary { .. } => CameraType::Stationary,
            CameraRig::Follow { .. } => CameraType::Follow,
            CameraRig::FirstPerson { .. } => CameraType::FirstPerson,
            CameraRig::ArcRotate { .. } => CameraType::ArcRotate,
        }
    }
}

/// A constructed camera instance
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCamera {
    pub id: CameraId,
    pub rig: CameraRig,
    pub projection: Projection,
    /// Eye position from the last update
    pub eye: Vec3,
    /// Point looked at from the last update
    pub look_at: Vec3,
}

impl SceneCamera {
    /// Build a camera of the given type
    pub fn new(id: CameraId, camera_type: CameraType, target: Option<Entity>) -> Self {
        let mut camera = Self {
            id,
            rig: CameraRig::new(camera_type, target),
            projection: Projection::default(),
            eye: Vec3::ZERO,
            look_at: Vec3::Z,
        };
        camera.update(None);
        camera
    }

    /// The type of this camera
    pub fn camera_type(&self) -> CameraType {
        self.rig.camera_type()
    }

    /// Entity this camera tracks, if any
    pub fn target(&self) -> Option<Entity> {
        match self.rig {
            CameraRig::FreeDebug { .. } => None,
            CameraRig::Stationary { target, .. }
            | CameraRig::Follow { target, .. }
            | CameraRig::ArcRotate { target, .. } => target,
            CameraRig::FirstPerson { anchor, .. } => anchor,
        }
    }

    /// Point the camera at another entity, keeping radius, angles and offsets
    pub fn retarget(&mut self, entity: Entity) -> Result<(), CameraError> {
        match &mut self.rig {
            CameraRig::FreeDebug { .. } => Err(CameraError::NotLockable(CameraType::FreeDebug)),
            CameraRig::Stationary { target, .. }
            | CameraRig::Follow { target, .. }
            | CameraRig::ArcRotate { target, .. } => {
                *target = Some(entity);
                Ok(())
            }
            CameraRig::FirstPerson { anchor, .. } => {
                *anchor = Some(entity);
                Ok(())
            }
        }
    }

    /// Recompute eye and look-at from the tracked entity's position
    pub fn update(&mut self, target_position: Option<Vec3>) {
        match self.rig {
            CameraRig::FreeDebug {
                position,
                yaw,
                pitch,
                ..
            } => {
                let forward = Vec3::new(
                    yaw.sin() * pitch.cos(),
                    pitch.sin(),
                    yaw.cos() * pitch.cos(),
                );
                self.eye = position;
                self.look_at = position + forward;
            }
            CameraRig::Stationary { position, .. } => {
                self.eye = position;
                if let Some(target) = target_position {
                    self.look_at = target;
                }
            }
            CameraRig::Follow {
                radius,
                height_offset,
                ..
            } => {
                let target = target_position.unwrap_or(Vec3::ZERO);
                self.eye = target + Vec3::new(0.0, height_offset, -radius);
                self.look_at = target;
            }
            CameraRig::FirstPerson { eye_height, .. } => {
                let base = target_position.unwrap_or(Vec3::ZERO);
                self.eye = base + Vec3::Y * eye_height;
                self.look_at = self.eye + Vec3::Z;
            }
            CameraRig::ArcRotate {
                alpha,
                beta,
                radius,
                ..
            } => {
                let target = target_position.unwrap_or(Vec3::ZERO);
                let offset = Vec3::new(
                    alpha.cos() * beta.sin(),
                    beta.cos(),
                    alpha.sin() * beta.sin(),
                ) * radius;
                self.eye = target + offset;
                self.look_at = target;
            }
        }
    }

    /// Move a free camera relative to its heading
    pub fn translate_free(&mut self, local: Vec3) -> Result<(), CameraError> {
        let CameraRig::FreeDebug {
            position,
            yaw,
            speed,
            ..
        } = &mut self.rig
        else {
            return Err(CameraError::NotFreeControl(self.rig.camera_type()));
        };
        let forward = Vec3::new(yaw.sin(), 0.0, yaw.cos());
        let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());
        *position += (right * local.x + Vec3::Y * local.y + forward * local.z) * *speed;
        self.update(None);
        Ok(())
    }
}
