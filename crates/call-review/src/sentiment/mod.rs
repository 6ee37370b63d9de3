//! Sentiment polarity as consumed by the tone check.
//!
//! The evaluator only needs a signed polarity in roughly `[-1.0, 1.0]`. Any
//! backend can plug in through [`SentimentScorer`]; [`LexiconSentimentScorer`]
//! is the default English word-list scorer.

mod lexicon;

pub use lexicon::LexiconSentimentScorer;

use std::sync::Arc;

/// Outcome of asking a scorer for a polarity.
pub type SentimentReading = Result<f32, SentimentError>;

/// Source of sentiment polarity for a transcript.
pub trait SentimentScorer: Send + Sync {
    /// Positive values are favorable, negative unfavorable, zero neutral.
    fn polarity(&self, text: &str) -> SentimentReading;
}

impl<T> SentimentScorer for Arc<T>
where
    T: SentimentScorer + ?Sized,
{
    fn polarity(&self, text: &str) -> SentimentReading {
        (**self).polarity(text)
    }
}

/// Reasons a polarity could not be produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SentimentError {
    #[error("transcript is empty")]
    EmptyText,
    #[error("transcript language is not supported by the sentiment scorer")]
    UnsupportedLanguage,
    #[error("sentiment scorer returned a non-finite polarity ({0})")]
    InvalidPolarity(f32),
    #[error("sentiment backend failed: {0}")]
    Backend(String),
}
