//! Configuration types for the engine

use crate::core::camera::CameraType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use winit::keyboard::KeyCode;

/// Errors raised while reading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid asset name: {0}")]
    InvalidName(String),

    #[error("Directory not found: {0:?}")]
    MissingDirectory(PathBuf),
}

/// Configuration for asset paths
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Root directory for all assets
    pub asset_root: PathBuf,
    /// Directory name for model files (relative to asset_root)
    pub models_dir: String,
    /// Directory name for level files (relative to asset_root)
    pub levels_dir: String,
}

impl AssetConfig {
    /// Create a new AssetConfig with custom paths
    pub fn new(asset_root: PathBuf, models_dir: String, levels_dir: String) -> Self {
        debug!(
            asset_root = ?asset_root,
            models_dir = models_dir,
            levels_dir = levels_dir,
            "Creating new AssetConfig"
        );
        Self {
            asset_root,
            models_dir,
            levels_dir,
        }
    }

    /// Get the full path to a model file
    ///
    /// Model names may contain sub-directories but never parent references
    /// or absolute components.
    pub fn model_path(&self, name: &str) -> Result<PathBuf, ConfigError> {
        if name.is_empty() || name.contains("..") || name.contains('\\') || name.starts_with('/')
        {
            return Err(ConfigError::InvalidName(name.to_string()));
        }
        let path = self.asset_root.join(&self.models_dir).join(name);
        debug!(name = name, path = ?path, "Generated model path");
        Ok(path)
    }

    /// Get the full path to a level file
    pub fn level_path(&self, name: &str) -> Result<PathBuf, ConfigError> {
        if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
            return Err(ConfigError::InvalidName(name.to_string()));
        }
        let path = self
            .asset_root
            .join(&self.levels_dir)
            .join(format!("{name}.json"));
        debug!(name = name, path = ?path, "Generated level path");
        Ok(path)
    }

    /// Check if the asset directories exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        let models_path = self.asset_root.join(&self.models_dir);
        let levels_path = self.asset_root.join(&self.levels_dir);

        for path in [&self.asset_root, &models_path, &levels_path] {
            if !path.exists() {
                return Err(ConfigError::MissingDirectory(path.clone()));
            }
        }

        Ok(())
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            models_dir: "models".to_string(),
            levels_dir: "levels".to_string(),
        }
    }
}

/// What a stage does with a model import that reported failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadFailurePolicy {
    /// Spawn a placeholder entity and keep building
    #[default]
    Placeholder,
    /// Fail the stage with every import failure aggregated
    Abort,
}

/// A key that activates a camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraBinding {
    pub camera: CameraType,
    pub key: KeyCode,
}

/// Stage construction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Upper bound on the import phase; `None` waits indefinitely
    pub import_timeout_ms: Option<u64>,
    /// Handling of failed model imports
    pub failure_policy: LoadFailurePolicy,
    /// Cameras built for every stage
    pub cameras: Vec<CameraType>,
    /// Camera activated on construction and used as the fallback
    pub default_camera: CameraType,
    /// Keys switching the active camera
    pub camera_keys: Vec<CameraBinding>,
    /// Resolution of each shadow map
    pub shadow_map_size: u32,
}

impl StageConfig {
    /// Import timeout as a duration
    pub fn import_timeout(&self) -> Option<Duration> {
        self.import_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            import_timeout_ms: Some(30_000),
            failure_policy: LoadFailurePolicy::Placeholder,
            cameras: CameraType::ALL.to_vec(),
            default_camera: CameraType::Follow,
            camera_keys: [
                (CameraType::FreeDebug, KeyCode::F1),
                (CameraType::Stationary, KeyCode::F2),
                (CameraType::Follow, KeyCode::F3),
                (CameraType::FirstPerson, KeyCode::F4),
                (CameraType::ArcRotate, KeyCode::F5),
            ]
            .into_iter()
            .map(|(camera, key)| CameraBinding { camera, key })
            .collect(),
            shadow_map_size: 1024,
        }
    }
}

/// Configuration for engine initialization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Asset configuration
    pub assets: AssetConfig,
    /// Stage construction settings
    pub stage: StageConfig,
    /// Custom logging filter (None = `RUST_LOG` or `info`)
    pub log_filter: Option<String>,
}

impl EngineConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        debug!(path = ?path, "Loaded engine config");
        Ok(config)
    }
}
