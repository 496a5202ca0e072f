//! Level definitions and their JSON form

use crate::physics::{presets, PhysicsPreset, ShapeKind};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Errors that can occur while reading or checking a level
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown physics preset: {0}")]
    UnknownPreset(String),
}

/// A physics preset given by table name or spelled out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PresetSpec {
    Named(String),
    Inline(PhysicsPreset),
}

impl PresetSpec {
    pub fn named(name: &str) -> Self {
        PresetSpec::Named(name.to_string())
    }

    /// Look the preset up in the shared table if it is named
    pub fn resolve(&self) -> Result<PhysicsPreset, LevelError> {
        match self {
            PresetSpec::Named(name) => {
                presets::by_name(name).ok_or_else(|| LevelError::UnknownPreset(name.clone()))
            }
            PresetSpec::Inline(preset) => Ok(*preset),
        }
    }
}

impl From<PhysicsPreset> for PresetSpec {
    fn from(preset: PhysicsPreset) -> Self {
        PresetSpec::Inline(preset)
    }
}

fn decoration() -> PresetSpec {
    PresetSpec::named("decoration")
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

/// A physical body placed in the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDef {
    #[serde(default)]
    pub name: Option<String>,
    pub position: Vec3,
    pub shape: ShapeKind,
    pub preset: PresetSpec,
}

impl BodyDef {
    pub fn new(position: Vec3, shape: ShapeKind, preset: impl Into<PresetSpec>) -> Self {
        Self {
            name: None,
            position,
            shape,
            preset: preset.into(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A collectable item; items have no impostor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDef {
    pub name: String,
    pub position: Vec3,
}

/// A model to import and place once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDef {
    /// Model path relative to the model directory
    pub path: String,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
    #[serde(default = "decoration")]
    pub preset: PresetSpec,
}

impl ImportDef {
    pub fn new(path: impl Into<String>, position: Vec3) -> Self {
        Self {
            path: path.into(),
            position,
            scale: Vec3::ONE,
            preset: decoration(),
        }
    }

    pub fn with_preset(mut self, preset: impl Into<PresetSpec>) -> Self {
        self.preset = preset.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyboxDef {
    pub texture: String,
    pub size: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDef {
    pub texture: String,
    pub position: Vec3,
    pub size: f32,
}

/// Light source kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightKind {
    Directional { direction: Vec3 },
    Point { position: Vec3 },
    Hemispheric { direction: Vec3 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightDef {
    pub kind: LightKind,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
    /// Whether the light gets a shadow generator
    #[serde(default)]
    pub cast_shadows: bool,
}

fn default_intensity() -> f32 {
    1.0
}

/// Declarative content of a stage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDefinition {
    pub name: String,
    pub player: Option<BodyDef>,
    pub walls: Vec<BodyDef>,
    pub movables: Vec<BodyDef>,
    pub items: Vec<ItemDef>,
    pub bots: Vec<BodyDef>,
    pub imports: Vec<ImportDef>,
    pub skybox: Option<SkyboxDef>,
    pub sprites: Vec<SpriteDef>,
    pub lights: Vec<LightDef>,
}

impl LevelDefinition {
    /// Create an empty level
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a level from JSON text
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Check that every named preset exists
    pub fn validate(&self) -> Result<(), LevelError> {
        let bodies = self
            .player
            .iter()
            .chain(&self.walls)
            .chain(&self.movables)
            .chain(&self.bots)
            .map(|body| &body.preset);
        for preset in bodies.chain(self.imports.iter().map(|import| &import.preset)) {
            preset.resolve()?;
        }
        debug!(level = %self.name, "Level presets validated");
        Ok(())
    }

    /// Save this level to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LevelError> {
        let path = path.as_ref();
        info!(path = ?path, "Saving level to file");

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        info!(path = ?path, "Level saved successfully");
        Ok(())
    }

    /// Load a level from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LevelError> {
        let path = path.as_ref();
        info!(path = ?path, "Loading level from file");

        let json = fs::read_to_string(path)?;
        let level = Self::from_json(&json)?;

        info!(path = ?path, level = %level.name, "Level loaded successfully");
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_level_json() {
        let json = r#"{
            "name": "tiny",
            "walls": [{
                "position": [0, 0, 5],
                "shape": {"type": "box", "half_extents": [5, 1, 0.5]},
                "preset": "wall"
            }],
            "imports": [{"path": "props/tree.obj"}]
        }"#;

        let level = LevelDefinition::from_json(json).unwrap();
        assert_eq!(level.name, "tiny");
        assert!(level.player.is_none());
        assert_eq!(level.walls[0].preset.resolve().unwrap(), presets::WALL);
        assert_eq!(level.imports[0].scale, Vec3::ONE);
        assert_eq!(level.imports[0].preset, PresetSpec::named("decoration"));
    }

    #[test]
    fn test_inline_preset() {
        let json = r#"{
            "name": "inline",
            "movables": [{
                "position": [0, 1, 0],
                "shape": {"type": "sphere", "radius": 0.5},
                "preset": {"state": {"kind": "movable", "density": 3.0}, "friction": 0.2}
            }]
        }"#;

        let level = LevelDefinition::from_json(json).unwrap();
        let preset = level.movables[0].preset.resolve().unwrap();
        assert_eq!(preset, PhysicsPreset::movable(3.0, 0.2, 0.0));
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        let json = r#"{
            "name": "bad",
            "walls": [{
                "position": [0, 0, 0],
                "shape": {"type": "sphere", "radius": 1},
                "preset": "lava"
            }]
        }"#;

        assert!(matches!(
            LevelDefinition::from_json(json),
            Err(LevelError::UnknownPreset(name)) if name == "lava"
        ));
    }

    #[test]
    fn test_level_file_io() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.json");

        let mut level = LevelDefinition::new("saved");
        level.player = Some(BodyDef::new(
            Vec3::Y,
            ShapeKind::Capsule {
                radius: 0.5,
                half_height: 0.5,
            },
            PresetSpec::named("player_body"),
        ));
        level.lights.push(LightDef {
            kind: LightKind::Directional {
                direction: Vec3::new(0.0, -1.0, 1.0),
            },
            intensity: 0.8,
            cast_shadows: true,
        });

        level.save_to_file(&path).unwrap();
        let loaded = LevelDefinition::load_from_file(&path).unwrap();

        assert_eq!(loaded, level);
    }
}
