//! Asset store interface and import data types

use super::CancellationToken;
use crate::physics::ShapeKind;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A model to import, addressed relative to the store's model directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportRequest {
    pub path: String,
}

impl ImportRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Summary of one mesh produced by an import
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedMesh {
    pub name: String,
    pub vertex_count: usize,
    pub index_count: usize,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
}

impl LoadedMesh {
    /// Build a mesh summary from flat `[x, y, z, ...]` positions
    pub fn from_positions(name: impl Into<String>, positions: &[f32], index_count: usize) -> Self {
        let mut bounds_min = Vec3::splat(f32::MAX);
        let mut bounds_max = Vec3::splat(f32::MIN);
        for chunk in positions.chunks_exact(3) {
            let point = Vec3::new(chunk[0], chunk[1], chunk[2]);
            bounds_min = bounds_min.min(point);
            bounds_max = bounds_max.max(point);
        }
        if positions.len() < 3 {
            bounds_min = Vec3::ZERO;
            bounds_max = Vec3::ZERO;
        }

        Self {
            name: name.into(),
            vertex_count: positions.len() / 3,
            index_count,
            bounds_min,
            bounds_max,
        }
    }

    /// Axis-aligned box of the given size centred on the origin
    pub fn cuboid(name: impl Into<String>, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            name: name.into(),
            vertex_count: 8,
            index_count: 36,
            bounds_min: -half,
            bounds_max: half,
        }
    }

    /// Collision box enclosing the mesh
    pub fn shape(&self) -> ShapeKind {
        ShapeKind::from_bounds(self.bounds_min, self.bounds_max)
    }
}

/// Reasons an import did not produce meshes
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("model not found: {0}")]
    NotFound(String),

    #[error("invalid model path: {0}")]
    InvalidPath(String),

    #[error("unsupported model format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("model contains no meshes: {0}")]
    Empty(String),

    #[error("import timed out")]
    TimedOut,

    #[error("import cancelled")]
    Cancelled,
}

/// Result delivered for one import request
pub type ImportOutcome = Result<Vec<LoadedMesh>, LoadError>;

/// Completion callback; may be invoked from a worker thread
pub type ImportCallback = Box<dyn FnOnce(ImportOutcome) + Send>;

/// File-backed model loading consumed by the stage
pub trait AssetStore {
    /// Start importing a model and return immediately
    ///
    /// `on_loaded` is invoked exactly once per request, later or inline,
    /// with the meshes or the failure. Work for a cancelled token may be
    /// skipped, reporting [`LoadError::Cancelled`].
    fn import_model(
        &mut self,
        request: ImportRequest,
        cancel: CancellationToken,
        on_loaded: ImportCallback,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_positions() {
        let positions = [-1.0, 0.0, -2.0, 1.0, 3.0, 2.0, 0.0, 1.0, 0.0];
        let mesh = LoadedMesh::from_positions("tri", &positions, 3);

        assert_eq!(mesh.vertex_count, 3);
        assert_eq!(mesh.bounds_min, Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(mesh.bounds_max, Vec3::new(1.0, 3.0, 2.0));
        assert!((mesh.shape().volume() - 24.0).abs() < 1e-5);
    }

    #[test]
    fn test_empty_positions_have_zero_bounds() {
        let mesh = LoadedMesh::from_positions("empty", &[], 0);
        assert_eq!(mesh.bounds_min, Vec3::ZERO);
        assert_eq!(mesh.bounds_max, Vec3::ZERO);
    }
}
