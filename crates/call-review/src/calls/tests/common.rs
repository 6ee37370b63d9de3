use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::calls::collaborators::{
    SpeechSynthesizer, SynthesisError, Transcriber, TranscriptionError,
};
use crate::calls::domain::CallId;
use crate::calls::repository::{ArtifactKind, ArtifactStore, StoreError};
use crate::calls::{call_router, CallReviewService};
use crate::evaluation::RubricEvaluator;
use crate::sentiment::{SentimentReading, SentimentScorer};

pub(super) const MODEL_CALL: &str = "Good morning, I have an issue with billing. Absolutely, thank you for calling, have a nice day.";

#[derive(Debug, Clone, Copy)]
pub(super) struct FixedPolarity(pub f32);

impl SentimentScorer for FixedPolarity {
    fn polarity(&self, _text: &str) -> SentimentReading {
        Ok(self.0)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    artifacts: Arc<Mutex<HashMap<(CallId, ArtifactKind), Vec<u8>>>>,
}

impl MemoryStore {
    pub(super) fn text(&self, call_id: &str, kind: ArtifactKind) -> Option<String> {
        let call_id = CallId::new(call_id).expect("valid id");
        self.artifacts
            .lock()
            .expect("store mutex poisoned")
            .get(&(call_id, kind))
            .map(|bytes| String::from_utf8(bytes.clone()).expect("utf-8 artifact"))
    }

    pub(super) fn bytes(&self, call_id: &str, kind: ArtifactKind) -> Option<Vec<u8>> {
        let call_id = CallId::new(call_id).expect("valid id");
        self.artifacts
            .lock()
            .expect("store mutex poisoned")
            .get(&(call_id, kind))
            .cloned()
    }

    pub(super) fn seed(&self, call_id: &str, kind: ArtifactKind, contents: &[u8]) {
        let call_id = CallId::new(call_id).expect("valid id");
        self.artifacts
            .lock()
            .expect("store mutex poisoned")
            .insert((call_id, kind), contents.to_vec());
    }
}

impl ArtifactStore for MemoryStore {
    fn put(&self, call_id: &CallId, kind: ArtifactKind, contents: &[u8]) -> Result<(), StoreError> {
        self.artifacts
            .lock()
            .expect("store mutex poisoned")
            .insert((call_id.clone(), kind), contents.to_vec());
        Ok(())
    }

    fn get(&self, call_id: &CallId, kind: ArtifactKind) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .artifacts
            .lock()
            .expect("store mutex poisoned")
            .get(&(call_id.clone(), kind))
            .cloned())
    }
}

pub(super) struct UnavailableStore;

impl ArtifactStore for UnavailableStore {
    fn put(&self, _call_id: &CallId, _kind: ArtifactKind, _contents: &[u8]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk offline".to_string()))
    }

    fn get(&self, _call_id: &CallId, _kind: ArtifactKind) -> Result<Option<Vec<u8>>, StoreError> {
        Err(StoreError::Unavailable("disk offline".to_string()))
    }
}

/// In-memory store whose writes for one artifact kind fail once armed.
#[derive(Default)]
pub(super) struct FlakyStore {
    pub(super) inner: MemoryStore,
    failing: Mutex<Option<ArtifactKind>>,
}

impl FlakyStore {
    pub(super) fn fail_writes_of(&self, kind: ArtifactKind) {
        *self.failing.lock().expect("flaky mutex poisoned") = Some(kind);
    }
}

impl ArtifactStore for FlakyStore {
    fn put(&self, call_id: &CallId, kind: ArtifactKind, contents: &[u8]) -> Result<(), StoreError> {
        if *self.failing.lock().expect("flaky mutex poisoned") == Some(kind) {
            return Err(StoreError::Unavailable(format!("{} volume full", kind.label())));
        }
        self.inner.put(call_id, kind, contents)
    }

    fn get(&self, call_id: &CallId, kind: ArtifactKind) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.get(call_id, kind)
    }
}

/// Returns a canned transcript for any non-empty recording.
pub(super) struct ScriptedTranscriber(pub &'static str);

impl Transcriber for ScriptedTranscriber {
    fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscriptionError> {
        Ok(self.0.to_string())
    }
}

pub(super) struct FailingTranscriber;

impl Transcriber for FailingTranscriber {
    fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscriptionError> {
        Err(TranscriptionError::Backend("model timed out".to_string()))
    }
}

/// Records the language it was asked for and echoes the text as bytes.
#[derive(Default)]
pub(super) struct EchoSynthesizer {
    pub(super) languages: Mutex<Vec<String>>,
}

impl SpeechSynthesizer for EchoSynthesizer {
    fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesisError> {
        self.languages
            .lock()
            .expect("synth mutex poisoned")
            .push(language.to_string());
        Ok(text.as_bytes().to_vec())
    }
}

pub(super) fn build_service(
    polarity: f32,
) -> (CallReviewService<MemoryStore, FixedPolarity>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service =
        CallReviewService::new(store.clone(), RubricEvaluator::new(FixedPolarity(polarity)));
    (service, store)
}

pub(super) fn call_id(raw: &str) -> CallId {
    CallId::new(raw).expect("valid id")
}

pub(super) fn router_with_service(
    service: CallReviewService<MemoryStore, FixedPolarity>,
) -> axum::Router {
    call_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
