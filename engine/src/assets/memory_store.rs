//! In-memory asset store with controllable delivery

use super::{
    AssetStore, CancellationToken, ImportCallback, ImportOutcome, ImportRequest, LoadError,
    LoadedMesh,
};
use std::collections::HashMap;
use tracing::{debug, trace};

/// When a [`MemoryAssetStore`] answers its requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Inside `import_model`
    #[default]
    Immediate,
    /// Only when one of the `deliver*` methods is called
    Manual,
}

struct PendingImport {
    request: ImportRequest,
    cancel: CancellationToken,
    on_loaded: ImportCallback,
}

/// Store answering from a table of registered models
///
/// Unregistered paths fail with [`LoadError::NotFound`]. In manual mode the
/// caller decides the order completions arrive in.
#[derive(Default)]
pub struct MemoryAssetStore {
    models: HashMap<String, ImportOutcome>,
    mode: DeliveryMode,
    pending: Vec<PendingImport>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that holds completions until delivered
    pub fn manual() -> Self {
        Self {
            mode: DeliveryMode::Manual,
            ..Self::default()
        }
    }

    /// Register meshes returned for a path
    pub fn insert_model(&mut self, path: impl Into<String>, meshes: Vec<LoadedMesh>) {
        self.models.insert(path.into(), Ok(meshes));
    }

    /// Make imports of a path fail
    pub fn fail_model(&mut self, path: impl Into<String>, error: LoadError) {
        self.models.insert(path.into(), Err(error));
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Paths of held requests in arrival order
    pub fn pending_paths(&self) -> Vec<&str> {
        self.pending
            .iter()
            .map(|pending| pending.request.path.as_str())
            .collect()
    }

    /// Deliver the oldest held request for `path`
    pub fn deliver(&mut self, path: &str) -> bool {
        match self
            .pending
            .iter()
            .position(|pending| pending.request.path == path)
        {
            Some(index) => self.deliver_at(index),
            None => false,
        }
    }

    /// Deliver the held request at `index` in arrival order
    pub fn deliver_at(&mut self, index: usize) -> bool {
        if index >= self.pending.len() {
            return false;
        }
        let pending = self.pending.remove(index);
        let outcome = self.outcome_for(&pending.request, &pending.cancel);
        (pending.on_loaded)(outcome);
        true
    }

    /// Deliver every held request, newest first
    pub fn deliver_all_reversed(&mut self) -> usize {
        let count = self.pending.len();
        while let Some(index) = self.pending.len().checked_sub(1) {
            self.deliver_at(index);
        }
        count
    }

    /// Deliver every held request in arrival order
    pub fn deliver_all(&mut self) -> usize {
        let count = self.pending.len();
        while !self.pending.is_empty() {
            self.deliver_at(0);
        }
        count
    }

    /// Drop every held request without answering it
    pub fn drop_pending(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    fn outcome_for(&self, request: &ImportRequest, cancel: &CancellationToken) -> ImportOutcome {
        if cancel.is_cancelled() {
            return Err(LoadError::Cancelled);
        }
        self.models
            .get(&request.path)
            .cloned()
            .unwrap_or_else(|| Err(LoadError::NotFound(request.path.clone())))
    }
}

impl AssetStore for MemoryAssetStore {
    fn import_model(
        &mut self,
        request: ImportRequest,
        cancel: CancellationToken,
        on_loaded: ImportCallback,
    ) {
        trace!(path = %request.path, mode = ?self.mode, "Memory import requested");
        match self.mode {
            DeliveryMode::Immediate => {
                let outcome = self.outcome_for(&request, &cancel);
                on_loaded(outcome);
            }
            DeliveryMode::Manual => {
                debug!(path = %request.path, "Holding import until delivered");
                self.pending.push(PendingImport {
                    request,
                    cancel,
                    on_loaded,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<ImportOutcome>>>, impl Fn() -> ImportCallback) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let shared = log.clone();
        let make = move || -> ImportCallback {
            let log = shared.clone();
            Box::new(move |outcome| log.lock().unwrap().push(outcome))
        };
        (log, make)
    }

    #[test]
    fn test_immediate_delivery() {
        let mut store = MemoryAssetStore::new();
        store.insert_model("crate.obj", vec![LoadedMesh::cuboid("crate", Vec3::ONE)]);
        let (log, callback) = recorder();

        store.import_model(ImportRequest::new("crate.obj"), CancellationToken::new(), callback());
        store.import_model(ImportRequest::new("nope.obj"), CancellationToken::new(), callback());

        let log = log.lock().unwrap();
        assert_eq!(log[0].as_ref().unwrap()[0].name, "crate");
        assert_eq!(log[1], Err(LoadError::NotFound("nope.obj".into())));
    }

    #[test]
    fn test_manual_delivery_order() {
        let mut store = MemoryAssetStore::manual();
        store.insert_model("a.obj", vec![LoadedMesh::cuboid("a", Vec3::ONE)]);
        store.insert_model("b.obj", vec![LoadedMesh::cuboid("b", Vec3::ONE)]);
        let (log, callback) = recorder();

        store.import_model(ImportRequest::new("a.obj"), CancellationToken::new(), callback());
        store.import_model(ImportRequest::new("b.obj"), CancellationToken::new(), callback());
        assert_eq!(store.pending_paths(), vec!["a.obj", "b.obj"]);
        assert!(log.lock().unwrap().is_empty());

        assert!(store.deliver("b.obj"));
        assert!(!store.deliver("b.obj"));
        assert_eq!(store.deliver_all(), 1);

        let names: Vec<String> = log
            .lock()
            .unwrap()
            .iter()
            .map(|outcome| outcome.as_ref().unwrap()[0].name.clone())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_cancelled_request_reports_cancelled() {
        let mut store = MemoryAssetStore::manual();
        store.insert_model("a.obj", Vec::new());
        let (log, callback) = recorder();
        let token = CancellationToken::new();

        store.import_model(ImportRequest::new("a.obj"), token.clone(), callback());
        token.cancel();
        store.deliver_all();

        assert_eq!(log.lock().unwrap()[0], Err(LoadError::Cancelled));
    }
}
