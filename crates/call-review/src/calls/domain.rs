use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evaluation::{EvaluationResult, ScoreComponent, Tone};

/// Caller-chosen key under which a call's artifacts are stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CallId(String);

impl CallId {
    pub fn new(raw: impl Into<String>) -> Result<Self, CallIdError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CallIdError::Empty);
        }
        if trimmed == "."
            || trimmed.contains("..")
            || trimmed.contains(['/', '\\'])
            || trimmed.chars().any(char::is_control)
        {
            return Err(CallIdError::Unsafe(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Derives the id from an upload name, dropping directories and the
    /// extension (`"calls/call_01.mp3"` becomes `call_01`).
    pub fn from_file_name(file_name: &str) -> Result<Self, CallIdError> {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or(CallIdError::Empty)?;
        Self::new(stem)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CallId {
    type Error = CallIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CallId> for String {
    fn from(value: CallId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallIdError {
    #[error("call id must not be empty")]
    Empty,
    #[error("call id '{0}' must not contain path separators, '..' or control characters")]
    Unsafe(String),
}

/// A freshly evaluated call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallReview {
    pub call_id: CallId,
    pub evaluation: EvaluationResult,
    pub evaluated_at: DateTime<Utc>,
}

impl CallReview {
    pub fn view(&self) -> CallReviewView {
        CallReviewView {
            call_id: self.call_id.clone(),
            score: self.evaluation.score(),
            tone: self.evaluation.tone(),
            tone_label: self.evaluation.tone().label(),
            matched_intents: self.evaluation.matched_intents().to_vec(),
            components: self.evaluation.components().to_vec(),
            feedback: self.evaluation.feedback().to_vec(),
            feedback_text: self.evaluation.feedback_text(),
            evaluated_at: self.evaluated_at,
        }
    }
}

/// API representation of a [`CallReview`].
#[derive(Debug, Clone, Serialize)]
pub struct CallReviewView {
    pub call_id: CallId,
    pub score: u8,
    pub tone: Tone,
    pub tone_label: &'static str,
    pub matched_intents: Vec<String>,
    pub components: Vec<ScoreComponent>,
    pub feedback: Vec<String>,
    pub feedback_text: String,
    pub evaluated_at: DateTime<Utc>,
}

/// Artifacts read back from the store for a previously reviewed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredCall {
    pub call_id: CallId,
    pub score: u8,
    pub transcript: String,
    pub feedback_text: String,
}
