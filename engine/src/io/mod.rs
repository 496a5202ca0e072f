//! Input/Output module for level definitions

mod level;

pub use level::{
    BodyDef, ImportDef, ItemDef, LevelDefinition, LevelError, LightDef, LightKind, PresetSpec,
    SkyboxDef, SpriteDef,
};
