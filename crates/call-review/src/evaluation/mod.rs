//! Call rubric: greeting, intent recognition, positive language, tone and
//! closing, scored in that order.

mod lexicon;
mod rules;
mod tone;
mod transcript;

#[cfg(test)]
mod tests;

pub use lexicon::{
    IntentCategory, IntentLexicon, CLOSING_PHRASES, GREETING_PHRASES, POSITIVE_PHRASES,
};
pub use tone::Tone;
pub use transcript::Transcript;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::sentiment::{LexiconSentimentScorer, SentimentReading, SentimentScorer};
use rules::score_transcript;
use tone::validate_reading;

/// Upper bound on the total score.
pub const MAX_SCORE: u8 = 100;

/// Stateless evaluator applying the rubric to a transcript.
#[derive(Debug, Clone)]
pub struct RubricEvaluator<S = LexiconSentimentScorer> {
    scorer: S,
    lexicon: IntentLexicon,
}

impl Default for RubricEvaluator<LexiconSentimentScorer> {
    fn default() -> Self {
        Self::new(LexiconSentimentScorer::new())
    }
}

impl<S> RubricEvaluator<S>
where
    S: SentimentScorer,
{
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            lexicon: IntentLexicon::standard(),
        }
    }

    pub fn with_lexicon(mut self, lexicon: IntentLexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Scores the transcript. Never fails: a sentiment failure resolves the
    /// tone to [`Tone::Unknown`] and is explained in the feedback.
    pub fn evaluate(&self, transcript: &Transcript) -> EvaluationResult {
        let reading = self.scorer.polarity(transcript.as_str());
        self.evaluate_with_reading(transcript, reading)
    }

    /// Scores the transcript against an already obtained sentiment reading.
    pub fn evaluate_with_reading(
        &self,
        transcript: &Transcript,
        reading: SentimentReading,
    ) -> EvaluationResult {
        let reading = validate_reading(reading);
        if let Err(err) = &reading {
            warn!(error = %err, "sentiment analysis unavailable; tone resolves to unknown");
        }

        let (components, signals) = score_transcript(transcript, &self.lexicon, &reading);
        let result = EvaluationResult::from_components(
            components,
            signals.tone,
            signals
                .matched_intents
                .into_iter()
                .map(str::to_string)
                .collect(),
        );

        debug!(
            score = result.score,
            tone = %result.tone,
            intents = ?result.matched_intents,
            "transcript evaluated"
        );

        result
    }
}

/// One of the five independently scored aspects of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricCriterion {
    Greeting,
    IntentRecognition,
    PositiveLanguage,
    Tone,
    Closing,
}

impl RubricCriterion {
    pub const ALL: [RubricCriterion; 5] = [
        RubricCriterion::Greeting,
        RubricCriterion::IntentRecognition,
        RubricCriterion::PositiveLanguage,
        RubricCriterion::Tone,
        RubricCriterion::Closing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RubricCriterion::Greeting => "Greeting",
            RubricCriterion::IntentRecognition => "Intent recognition",
            RubricCriterion::PositiveLanguage => "Positive language",
            RubricCriterion::Tone => "Tone",
            RubricCriterion::Closing => "Closing",
        }
    }
}

/// Points and feedback produced by a single rubric step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub criterion: RubricCriterion,
    pub points: u8,
    pub feedback: Vec<String>,
}

impl ScoreComponent {
    pub(crate) fn awarded(
        criterion: RubricCriterion,
        points: u8,
        statement: impl Into<String>,
    ) -> Self {
        Self {
            criterion,
            points,
            feedback: vec![statement.into()],
        }
    }

    pub(crate) fn withheld(criterion: RubricCriterion, statement: impl Into<String>) -> Self {
        Self::awarded(criterion, 0, statement)
    }
}

/// Score, tone and feedback for one call. Built once per evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    score: u8,
    tone: Tone,
    matched_intents: Vec<String>,
    components: Vec<ScoreComponent>,
    feedback: Vec<String>,
}

impl EvaluationResult {
    fn from_components(
        components: Vec<ScoreComponent>,
        tone: Tone,
        matched_intents: Vec<String>,
    ) -> Self {
        let total: u16 = components
            .iter()
            .map(|component| u16::from(component.points))
            .sum();
        let score = total.min(u16::from(MAX_SCORE)) as u8;
        let feedback = components
            .iter()
            .flat_map(|component| component.feedback.iter().cloned())
            .collect();

        Self {
            score,
            tone,
            matched_intents,
            components,
            feedback,
        }
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    /// Intent categories found, in lexicon order.
    pub fn matched_intents(&self) -> &[String] {
        &self.matched_intents
    }

    pub fn components(&self) -> &[ScoreComponent] {
        &self.components
    }

    pub fn component(&self, criterion: RubricCriterion) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.criterion == criterion)
    }

    pub fn points_for(&self, criterion: RubricCriterion) -> u8 {
        self.component(criterion)
            .map(|component| component.points)
            .unwrap_or(0)
    }

    /// Feedback statements in rubric order.
    pub fn feedback(&self) -> &[String] {
        &self.feedback
    }

    /// Statements separated by paragraph breaks.
    pub fn feedback_text(&self) -> String {
        self.feedback.join("\n\n")
    }

    pub fn tone_summary(&self) -> String {
        format!("Tone detected: {}", self.tone)
    }

    pub fn feedback_text_with_header(&self) -> String {
        format!("{}\n\n{}", self.tone_summary(), self.feedback_text())
    }
}
