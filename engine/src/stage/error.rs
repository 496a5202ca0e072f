//! Stage construction errors

use crate::assets::LoadError;
use crate::core::camera::CameraError;
use crate::io::LevelError;
use crate::physics::PhysicsConfigError;

/// One model import that did not produce meshes
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{path}: {error}")]
pub struct ImportFailure {
    pub path: String,
    pub error: LoadError,
}

/// Aggregated error surfaced to a stage's owner
///
/// Any of these aborts the remaining construction phases.
#[derive(Debug, thiserror::Error)]
pub enum StageInitError {
    #[error("invalid physics preset for {entity}: {source}")]
    Physics {
        entity: String,
        #[source]
        source: PhysicsConfigError,
    },

    #[error("level error: {0}")]
    Level(#[from] LevelError),

    #[error("{} model import(s) failed", .0.len())]
    Imports(Vec<ImportFailure>),

    #[error("camera system error: {0}")]
    Camera(#[from] CameraError),

    #[error("stage construction cancelled")]
    Cancelled,

    #[error("stage construction has not finished")]
    Incomplete,
}
