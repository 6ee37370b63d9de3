use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::collaborators::{
    SpeechSynthesizer, SynthesisError, Transcriber, TranscriptionError,
    ACCEPTED_AUDIO_EXTENSIONS, FEEDBACK_LANGUAGE,
};
use super::domain::{CallId, CallIdError, CallReview, StoredCall};
use super::repository::{ArtifactKind, ArtifactStore, StoreError};
use crate::evaluation::{RubricEvaluator, Transcript};
use crate::sentiment::SentimentScorer;

/// Service composing the rubric evaluator with artifact storage.
pub struct CallReviewService<R, S> {
    store: Arc<R>,
    evaluator: Arc<RubricEvaluator<S>>,
}

impl<R, S> CallReviewService<R, S>
where
    R: ArtifactStore + 'static,
    S: SentimentScorer + 'static,
{
    pub fn new(store: Arc<R>, evaluator: RubricEvaluator<S>) -> Self {
        Self {
            store,
            evaluator: Arc::new(evaluator),
        }
    }

    /// Evaluate a transcript and persist transcript, score and feedback text.
    pub fn review_transcript(
        &self,
        call_id: CallId,
        transcript: Transcript,
    ) -> Result<CallReview, CallReviewError> {
        let evaluation = self.evaluator.evaluate(&transcript);

        self.replace_artifacts(
            &call_id,
            [
                (ArtifactKind::Score, evaluation.score().to_string().into_bytes()),
                (ArtifactKind::FeedbackText, evaluation.feedback_text().into_bytes()),
                (ArtifactKind::Transcript, transcript.as_str().as_bytes().to_vec()),
            ],
        )?;

        info!(
            call_id = %call_id,
            score = evaluation.score(),
            tone = %evaluation.tone(),
            "call reviewed"
        );

        Ok(CallReview {
            call_id,
            evaluation,
            evaluated_at: Utc::now(),
        })
    }

    /// Transcribe an uploaded recording and review it under its file stem.
    pub fn review_recording<T>(
        &self,
        file_name: &str,
        audio: &[u8],
        transcriber: &T,
    ) -> Result<CallReview, CallReviewError>
    where
        T: Transcriber + ?Sized,
    {
        ensure_audio_upload(file_name)?;
        let call_id = CallId::from_file_name(file_name)?;
        if audio.is_empty() {
            return Err(TranscriptionError::EmptyAudio.into());
        }

        let text = transcriber.transcribe(audio)?;
        self.review_transcript(call_id, Transcript::new(text))
    }

    /// Render the stored feedback text as speech and store it alongside.
    /// Returns the size of the rendered audio.
    pub fn publish_audio_feedback<Y>(
        &self,
        call_id: &CallId,
        synthesizer: &Y,
    ) -> Result<usize, CallReviewError>
    where
        Y: SpeechSynthesizer + ?Sized,
    {
        let feedback = self.read_text(call_id, ArtifactKind::FeedbackText)?;
        let audio = synthesizer.synthesize(&feedback, FEEDBACK_LANGUAGE)?;
        self.store
            .put(call_id, ArtifactKind::FeedbackAudio, &audio)?;
        Ok(audio.len())
    }

    /// Fetch a previously reviewed call for API responses.
    pub fn get(&self, call_id: &CallId) -> Result<StoredCall, CallReviewError> {
        let transcript = self.read_text(call_id, ArtifactKind::Transcript)?;
        let raw_score = self.read_text(call_id, ArtifactKind::Score)?;
        let score = raw_score.trim().parse::<u8>().map_err(|err| StoreError::Corrupt {
            call_id: call_id.clone(),
            kind: ArtifactKind::Score,
            reason: err.to_string(),
        })?;
        let feedback_text = self.read_text(call_id, ArtifactKind::FeedbackText)?;

        Ok(StoredCall {
            call_id: call_id.clone(),
            score,
            transcript,
            feedback_text,
        })
    }

    /// Writes the artifacts in order. When a write fails, the ones already
    /// replaced get their previous contents back. Callers put the transcript
    /// last: `get` reads it first, so an unfinished review stays invisible.
    fn replace_artifacts<const N: usize>(
        &self,
        call_id: &CallId,
        artifacts: [(ArtifactKind, Vec<u8>); N],
    ) -> Result<(), StoreError> {
        let mut replaced = Vec::with_capacity(N);
        for (kind, contents) in artifacts {
            let previous = self.store.get(call_id, kind)?;
            if let Err(err) = self.store.put(call_id, kind, &contents) {
                self.restore(call_id, replaced);
                return Err(err);
            }
            replaced.push((kind, previous));
        }
        Ok(())
    }

    fn restore(&self, call_id: &CallId, replaced: Vec<(ArtifactKind, Option<Vec<u8>>)>) {
        for (kind, previous) in replaced.into_iter().rev() {
            let Some(previous) = previous else {
                continue;
            };
            if let Err(err) = self.store.put(call_id, kind, &previous) {
                warn!(
                    call_id = %call_id,
                    kind = kind.label(),
                    error = %err,
                    "could not restore previous artifact"
                );
            }
        }
    }

    fn read_text(&self, call_id: &CallId, kind: ArtifactKind) -> Result<String, StoreError> {
        let bytes = self
            .store
            .get(call_id, kind)?
            .ok_or_else(|| StoreError::NotFound {
                call_id: call_id.clone(),
                kind,
            })?;
        String::from_utf8(bytes).map_err(|err| {
            warn!(call_id = %call_id, kind = kind.label(), "stored artifact is not utf-8");
            StoreError::Corrupt {
                call_id: call_id.clone(),
                kind,
                reason: err.to_string(),
            }
        })
    }
}

fn ensure_audio_upload(file_name: &str) -> Result<(), CallReviewError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let accepted = extension
        .as_deref()
        .is_some_and(|ext| ACCEPTED_AUDIO_EXTENSIONS.contains(&ext));
    let is_audio = mime_guess::from_path(file_name)
        .iter()
        .any(|mime| mime.type_() == mime_guess::mime::AUDIO);

    if accepted && is_audio {
        Ok(())
    } else {
        Err(CallReviewError::UnsupportedUpload(file_name.to_string()))
    }
}

/// Error raised by the call review service.
#[derive(Debug, thiserror::Error)]
pub enum CallReviewError {
    #[error(transparent)]
    CallId(#[from] CallIdError),
    #[error("'{0}' is not a supported recording (expected mp3, wav or m4a)")]
    UnsupportedUpload(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}
