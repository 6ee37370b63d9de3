use call_review::calls::{ArtifactKind, ArtifactStore, CallId, FileArtifactStore, StoreError};
use call_review::config::{StorageBackend, StorageConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local artifact store; contents vanish on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryArtifactStore {
    artifacts: Arc<Mutex<HashMap<(CallId, ArtifactKind), Vec<u8>>>>,
}

impl ArtifactStore for InMemoryArtifactStore {
    fn put(&self, call_id: &CallId, kind: ArtifactKind, contents: &[u8]) -> Result<(), StoreError> {
        let mut guard = self
            .artifacts
            .lock()
            .map_err(|_| StoreError::Unavailable("artifact mutex poisoned".to_string()))?;
        guard.insert((call_id.clone(), kind), contents.to_vec());
        Ok(())
    }

    fn get(&self, call_id: &CallId, kind: ArtifactKind) -> Result<Option<Vec<u8>>, StoreError> {
        let guard = self
            .artifacts
            .lock()
            .map_err(|_| StoreError::Unavailable("artifact mutex poisoned".to_string()))?;
        Ok(guard.get(&(call_id.clone(), kind)).cloned())
    }
}

/// Store selected by `APP_STORAGE_BACKEND`.
#[derive(Clone)]
pub(crate) enum ConfiguredStore {
    Filesystem(FileArtifactStore),
    Memory(InMemoryArtifactStore),
}

impl ConfiguredStore {
    pub(crate) fn open(config: &StorageConfig) -> Result<Self, StoreError> {
        match config.backend {
            StorageBackend::Filesystem => {
                FileArtifactStore::open(config.root.clone()).map(Self::Filesystem)
            }
            StorageBackend::Memory => Ok(Self::Memory(InMemoryArtifactStore::default())),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            ConfiguredStore::Filesystem(store) => format!("filesystem ({})", store.root().display()),
            ConfiguredStore::Memory(_) => "in-memory".to_string(),
        }
    }
}

impl ArtifactStore for ConfiguredStore {
    fn put(&self, call_id: &CallId, kind: ArtifactKind, contents: &[u8]) -> Result<(), StoreError> {
        match self {
            ConfiguredStore::Filesystem(store) => store.put(call_id, kind, contents),
            ConfiguredStore::Memory(store) => store.put(call_id, kind, contents),
        }
    }

    fn get(&self, call_id: &CallId, kind: ArtifactKind) -> Result<Option<Vec<u8>>, StoreError> {
        match self {
            ConfiguredStore::Filesystem(store) => store.get(call_id, kind),
            ConfiguredStore::Memory(store) => store.get(call_id, kind),
        }
    }
}
