//! Call review workflow: evaluate a transcript, persist its artifacts, and
//! drive the transcription and speech collaborators around the rubric.

pub mod collaborators;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use collaborators::{
    SpeechSynthesizer, SynthesisError, Transcriber, TranscriptionError,
    ACCEPTED_AUDIO_EXTENSIONS, FEEDBACK_LANGUAGE,
};
pub use domain::{CallId, CallIdError, CallReview, CallReviewView, StoredCall};
pub use repository::{ArtifactKind, ArtifactStore, FileArtifactStore, StoreError};
pub use router::{call_router, ReviewRequest};
pub use service::{CallReviewError, CallReviewService};
