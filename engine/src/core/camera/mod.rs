//! Scene cameras
//!
//! Every stage owns one camera per declared [`CameraType`]; the
//! [`CameraMultiplexer`] exposes exactly one of them as active.

mod multiplexer;
mod projection;
mod rig;

pub use multiplexer::{CameraError, CameraMultiplexer};
pub use projection::Projection;
pub use rig::{CameraId, CameraRig, CameraType, SceneCamera};
