//! OBJ model store backed by tobj

use super::{
    AssetStore, CancellationToken, ImportCallback, ImportOutcome, ImportRequest, LoadError,
    LoadedMesh,
};
use crate::config::AssetConfig;
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads OBJ models from the configured model directory on the rayon pool
///
/// Completions are delivered from a worker thread.
#[derive(Debug, Clone, Default)]
pub struct ObjAssetStore {
    config: AssetConfig,
}

impl ObjAssetStore {
    pub fn new(config: AssetConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }
}

impl AssetStore for ObjAssetStore {
    fn import_model(
        &mut self,
        request: ImportRequest,
        cancel: CancellationToken,
        on_loaded: ImportCallback,
    ) {
        let path = match self.config.model_path(&request.path) {
            Ok(path) => path,
            Err(error) => {
                warn!(path = %request.path, error = %error, "Rejected model path");
                on_loaded(Err(LoadError::InvalidPath(request.path)));
                return;
            }
        };

        debug!(path = ?path, "Queueing OBJ import");
        rayon::spawn(move || {
            if cancel.is_cancelled() {
                debug!(path = ?path, "Skipping cancelled import");
                on_loaded(Err(LoadError::Cancelled));
                return;
            }
            on_loaded(load_obj_meshes(&path));
        });
    }
}

/// Load every mesh of an OBJ file
pub fn load_obj_meshes(path: &Path) -> ImportOutcome {
    let path_str = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    if extension != "obj" {
        return Err(LoadError::UnsupportedFormat(extension));
    }
    if !path.exists() {
        return Err(LoadError::NotFound(path_str));
    }

    info!("Loading OBJ file: {:?}", path);
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|error| LoadError::Parse {
        path: path_str.clone(),
        reason: error.to_string(),
    })?;

    let meshes: Vec<LoadedMesh> = models
        .iter()
        .filter(|model| !model.mesh.positions.is_empty())
        .map(|model| {
            LoadedMesh::from_positions(
                model.name.clone(),
                &model.mesh.positions,
                model.mesh.indices.len(),
            )
        })
        .collect();

    if meshes.is_empty() {
        return Err(LoadError::Empty(path_str));
    }

    debug!(
        path = %path_str,
        meshes = meshes.len(),
        "Loaded OBJ model"
    );
    Ok(meshes)
}
