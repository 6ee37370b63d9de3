use crate::evaluation::{RubricEvaluator, Transcript};
use crate::sentiment::{SentimentError, SentimentReading, SentimentScorer};

/// Scorer returning a preset polarity regardless of the text.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedPolarity(pub f32);

impl SentimentScorer for FixedPolarity {
    fn polarity(&self, _text: &str) -> SentimentReading {
        Ok(self.0)
    }
}

/// Scorer standing in for an unreachable sentiment backend.
#[derive(Debug, Clone, Copy)]
pub(super) struct BrokenScorer;

impl SentimentScorer for BrokenScorer {
    fn polarity(&self, _text: &str) -> SentimentReading {
        Err(SentimentError::Backend("model not loaded".to_string()))
    }
}

pub(super) fn evaluator_with_polarity(polarity: f32) -> RubricEvaluator<FixedPolarity> {
    RubricEvaluator::new(FixedPolarity(polarity))
}

pub(super) fn transcript(text: &str) -> Transcript {
    Transcript::new(text)
}

pub(super) const MODEL_CALL: &str = "Good morning, I have an issue with billing. Absolutely, thank you for calling, have a nice day.";
