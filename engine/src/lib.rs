//! Stage engine
//!
//! This crate provides the stage initialization pipeline for the game:
//! ordered stage construction, an asset load barrier for asynchronous model
//! imports, a camera multiplexer and physics preset resolution. Rendering,
//! physics stepping and GUI widgets live behind the host traits in
//! [`graphics`] and [`assets`].

pub mod assets;
pub mod config;
pub mod core;
pub mod graphics;
pub mod input;
pub mod io;
pub mod physics;
pub mod stage;

// Re-export commonly used types
pub mod prelude {
    // Entity system types
    pub use crate::core::entity::{Entity, EntityKind, Name, Transform, Visible, World};

    // Context
    pub use crate::core::context::EngineContext;

    // Camera types
    pub use crate::core::camera::{CameraError, CameraMultiplexer, CameraType, SceneCamera};

    // Math types
    pub use glam::{Quat, Vec3};

    // Host types
    pub use crate::graphics::{HeadlessHost, HostCall, RenderHost, SurfaceId};

    // Asset types
    pub use crate::assets::{
        AssetStore, CancellationToken, ImportRequest, LoadBarrier, LoadError, LoadedMesh,
        MemoryAssetStore, ObjAssetStore,
    };

    // IO types
    pub use crate::io::{LevelDefinition, LevelError};

    // Config types
    pub use crate::config::{AssetConfig, EngineConfig, LoadFailurePolicy, StageConfig};

    // Physics types
    pub use crate::physics::{
        presets, ImpostorParams, PhysicsConfigError, PhysicsPreset, PhysicsPropertyResolver,
        PhysicsState, ShapeKind,
    };

    // Stage types
    pub use crate::stage::{Stage, StageInitError, StageLifecycle, StagePhase, StageStatus};

    // Input types
    pub use crate::input::InputState;

    pub use winit::keyboard::KeyCode;
}

/// Initialize logging for the engine
pub fn init_logging() {
    init_logging_with_filter(None);
}

/// Initialize logging with an explicit filter, falling back to `RUST_LOG`
pub fn init_logging_with_filter(filter: Option<&str>) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    // A second initialization (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
