use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::domain::CallId;

/// Kinds of blobs persisted for every reviewed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Transcript,
    Score,
    FeedbackText,
    FeedbackAudio,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Transcript,
        ArtifactKind::Score,
        ArtifactKind::FeedbackText,
        ArtifactKind::FeedbackAudio,
    ];

    pub fn folder(&self) -> &'static str {
        match self {
            ArtifactKind::Transcript => "transcripts",
            ArtifactKind::Score => "scores",
            ArtifactKind::FeedbackText => "feedback_text",
            ArtifactKind::FeedbackAudio => "feedback_audio",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ArtifactKind::FeedbackAudio => "mp3",
            _ => "txt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArtifactKind::Transcript => "transcript",
            ArtifactKind::Score => "score",
            ArtifactKind::FeedbackText => "feedback text",
            ArtifactKind::FeedbackAudio => "feedback audio",
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ArtifactStore: Send + Sync {
    /// Writes (or overwrites) one artifact.
    fn put(&self, call_id: &CallId, kind: ArtifactKind, contents: &[u8]) -> Result<(), StoreError>;
    fn get(&self, call_id: &CallId, kind: ArtifactKind) -> Result<Option<Vec<u8>>, StoreError>;
}

/// Error enumeration for artifact storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no {what} stored for call '{call_id}'", what = .kind.label())]
    NotFound { call_id: CallId, kind: ArtifactKind },
    #[error("stored {what} for call '{call_id}' is corrupt: {reason}", what = .kind.label())]
    Corrupt {
        call_id: CallId,
        kind: ArtifactKind,
        reason: String,
    },
    #[error("artifact storage io failure at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("artifact storage unavailable: {0}")]
    Unavailable(String),
}

/// Plain-text files under `<root>/<kind folder>/<call id>.<ext>`.
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    root: PathBuf,
}

impl FileArtifactStore {
    /// Creates the root and one folder per artifact kind.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        for kind in ArtifactKind::ALL {
            let folder = root.join(kind.folder());
            fs::create_dir_all(&folder).map_err(|source| StoreError::Io {
                path: folder.clone(),
                source,
            })?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, call_id: &CallId, kind: ArtifactKind) -> PathBuf {
        self.root
            .join(kind.folder())
            .join(format!("{}.{}", call_id.as_str(), kind.extension()))
    }
}

impl ArtifactStore for FileArtifactStore {
    fn put(&self, call_id: &CallId, kind: ArtifactKind, contents: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(call_id, kind);
        let staging = path.with_extension(format!("{}.partial", kind.extension()));
        fs::write(&staging, contents).map_err(|source| StoreError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| {
            fs::remove_file(&staging).ok();
            StoreError::Io { path, source }
        })
    }

    fn get(&self, call_id: &CallId, kind: ArtifactKind) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(call_id, kind);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_one_folder_per_kind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileArtifactStore::open(dir.path().join("artifacts")).expect("store opens");

        for kind in ArtifactKind::ALL {
            assert!(store.root().join(kind.folder()).is_dir(), "{kind:?}");
        }
    }

    #[test]
    fn put_then_get_uses_call_id_as_file_stem() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileArtifactStore::open(dir.path()).expect("store opens");
        let call_id = CallId::new("call_01").expect("valid id");

        store
            .put(&call_id, ArtifactKind::Score, b"80")
            .expect("write succeeds");

        let path = dir.path().join("scores").join("call_01.txt");
        assert_eq!(fs::read_to_string(path).expect("file exists"), "80");
        assert_eq!(
            store.get(&call_id, ArtifactKind::Score).expect("read"),
            Some(b"80".to_vec())
        );
    }

    #[test]
    fn feedback_audio_is_stored_as_mp3() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileArtifactStore::open(dir.path()).expect("store opens");
        let call_id = CallId::new("call_02").expect("valid id");

        assert_eq!(
            store.path_for(&call_id, ArtifactKind::FeedbackAudio),
            dir.path().join("feedback_audio").join("call_02.mp3")
        );
    }

    #[test]
    fn missing_artifact_reads_as_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileArtifactStore::open(dir.path()).expect("store opens");
        let call_id = CallId::new("never-stored").expect("valid id");

        assert!(store
            .get(&call_id, ArtifactKind::Transcript)
            .expect("read")
            .is_none());
    }

    #[test]
    fn overwrite_replaces_contents_without_leaving_staging_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileArtifactStore::open(dir.path()).expect("store opens");
        let call_id = CallId::new("call.v2").expect("valid id");

        store
            .put(&call_id, ArtifactKind::FeedbackText, b"first")
            .expect("first write");
        store
            .put(&call_id, ArtifactKind::FeedbackText, b"second")
            .expect("second write");

        assert_eq!(
            store.get(&call_id, ArtifactKind::FeedbackText).expect("read"),
            Some(b"second".to_vec())
        );
        let names: Vec<String> = fs::read_dir(dir.path().join("feedback_text"))
            .expect("list folder")
            .map(|entry| {
                entry
                    .expect("dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        assert_eq!(names, vec!["call.v2.txt".to_string()]);
    }
}
