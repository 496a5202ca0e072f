//! Declarative physics presets

use serde::{Deserialize, Serialize};

/// How a mesh takes part in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhysicsState {
    /// Immovable body; always massless
    Static,
    /// Dynamic body with a relative density (not SI units)
    Movable { density: f32 },
    /// No impostor at all
    None,
}

/// Immutable bundle of physical behavior constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsPreset {
    pub state: PhysicsState,
    #[serde(default)]
    pub friction: f32,
    #[serde(default)]
    pub restitution: f32,
}

impl PhysicsPreset {
    /// Static body preset
    pub const fn fixed(friction: f32, restitution: f32) -> Self {
        Self {
            state: PhysicsState::Static,
            friction,
            restitution,
        }
    }

    /// Movable body preset
    pub const fn movable(density: f32, friction: f32, restitution: f32) -> Self {
        Self {
            state: PhysicsState::Movable { density },
            friction,
            restitution,
        }
    }

    /// Preset that produces no impostor
    pub const fn none() -> Self {
        Self {
            state: PhysicsState::None,
            friction: 0.0,
            restitution: 0.0,
        }
    }
}

/// Shared preset table used by level definitions
pub mod presets {
    use super::PhysicsPreset;

    pub const GROUND: PhysicsPreset = PhysicsPreset::fixed(0.8, 0.1);
    pub const WALL: PhysicsPreset = PhysicsPreset::fixed(0.5, 0.2);
    pub const WOODEN_CRATE: PhysicsPreset = PhysicsPreset::movable(0.6, 0.6, 0.1);
    pub const METAL_BARREL: PhysicsPreset = PhysicsPreset::movable(2.5, 0.4, 0.05);
    pub const RUBBER_BALL: PhysicsPreset = PhysicsPreset::movable(0.3, 0.9, 0.85);
    pub const PLAYER_BODY: PhysicsPreset = PhysicsPreset::movable(1.0, 0.5, 0.0);
    pub const BOT_BODY: PhysicsPreset = PhysicsPreset::movable(1.2, 0.5, 0.0);
    pub const DECORATION: PhysicsPreset = PhysicsPreset::none();

    /// Every named preset, in table order
    pub const ALL: [(&str, PhysicsPreset); 8] = [
        ("ground", GROUND),
        ("wall", WALL),
        ("wooden_crate", WOODEN_CRATE),
        ("metal_barrel", METAL_BARREL),
        ("rubber_ball", RUBBER_BALL),
        ("player_body", PLAYER_BODY),
        ("bot_body", BOT_BODY),
        ("decoration", DECORATION),
    ];

    /// Look a preset up by its table name
    pub fn by_name(name: &str) -> Option<PhysicsPreset> {
        ALL.iter()
            .find(|(preset_name, _)| *preset_name == name)
            .map(|(_, preset)| *preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(presets::by_name("wall"), Some(presets::WALL));
        assert_eq!(presets::by_name("decoration"), Some(presets::DECORATION));
        assert_eq!(presets::by_name("lava"), None);
    }

    #[test]
    fn test_table_states() {
        for (name, preset) in presets::ALL {
            match preset.state {
                PhysicsState::Static => assert!(name == "ground" || name == "wall"),
                PhysicsState::Movable { density } => assert!(density > 0.0, "{name}"),
                PhysicsState::None => assert_eq!(name, "decoration"),
            }
        }
    }

    #[test]
    fn test_preset_json() {
        let json = r#"{"state":{"kind":"movable","density":2.0},"friction":0.3}"#;
        let preset: PhysicsPreset = serde_json::from_str(json).unwrap();
        assert_eq!(preset.state, PhysicsState::Movable { density: 2.0 });
        assert_eq!(preset.friction, 0.3);
        assert_eq!(preset.restitution, 0.0);
    }
}
