//! Stage construction
//!
//! A stage is built in a fixed sequence of [`StagePhase`]s. Synchronous
//! phases run inside [`StageBuilder`]; [`StageLifecycle`] drives the builder
//! across the asynchronous import phase.

mod builder;
mod error;
mod hud;
mod lifecycle;
mod phase;

pub use builder::{Imported, Light, Populated, ShadowGenerator, Stage, StageBuilder};
pub use error::{ImportFailure, StageInitError};
pub use hud::HudModel;
pub use lifecycle::{StageLifecycle, StageStatus};
pub use phase::{PhaseCursor, StagePhase};
