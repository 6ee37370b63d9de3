use crate::sentiment::SentimentReading;

use super::lexicon::{IntentLexicon, CLOSING_PHRASES, GREETING_PHRASES, POSITIVE_PHRASES};
use super::tone::{classify, Tone};
use super::transcript::Transcript;
use super::{RubricCriterion, ScoreComponent};

pub(crate) const FULL_AWARD: u8 = 20;
pub(crate) const NEUTRAL_TONE_AWARD: u8 = 10;

pub(crate) struct ScoreSignals {
    pub tone: Tone,
    pub matched_intents: Vec<&'static str>,
}

/// Runs the five rubric steps in order. Closing is scored last because it
/// reads the tone computed by the step before it.
pub(crate) fn score_transcript(
    transcript: &Transcript,
    lexicon: &IntentLexicon,
    reading: &SentimentReading,
) -> (Vec<ScoreComponent>, ScoreSignals) {
    let (intent_component, matched_intents) = intent_recognition(transcript, lexicon);
    let (tone_component, detected) = tone(reading);

    let components = vec![
        greeting(transcript),
        intent_component,
        positive_language(transcript),
        tone_component,
        closing(transcript, detected),
    ];

    (
        components,
        ScoreSignals {
            tone: detected,
            matched_intents,
        },
    )
}

pub(crate) fn greeting(transcript: &Transcript) -> ScoreComponent {
    if transcript.opens_with_any(GREETING_PHRASES) {
        ScoreComponent::awarded(
            RubricCriterion::Greeting,
            FULL_AWARD,
            "The call opened with a proper greeting, which sets a professional and courteous tone for the conversation.",
        )
    } else {
        ScoreComponent::withheld(
            RubricCriterion::Greeting,
            "The call did not open with a clear greeting. A warm opening such as 'Good morning' or 'Hello' helps establish rapport.",
        )
    }
}

pub(crate) fn intent_recognition(
    transcript: &Transcript,
    lexicon: &IntentLexicon,
) -> (ScoreComponent, Vec<&'static str>) {
    let matched = lexicon.matches(transcript);

    let component = if matched.is_empty() {
        ScoreComponent::withheld(
            RubricCriterion::IntentRecognition,
            "The customer's intent was not clearly identified. Confirming their needs early makes the rest of the call easier to steer.",
        )
    } else {
        ScoreComponent::awarded(
            RubricCriterion::IntentRecognition,
            FULL_AWARD,
            format!(
                "The customer's intent was identified and addressed: {}. This shows attentive listening.",
                matched.join(", ")
            ),
        )
    };

    (component, matched)
}

pub(crate) fn positive_language(transcript: &Transcript) -> ScoreComponent {
    if transcript.mentions_any(POSITIVE_PHRASES) {
        ScoreComponent::awarded(
            RubricCriterion::PositiveLanguage,
            FULL_AWARD,
            "Positive and supportive language was used, which keeps the conversation pleasant and helpful.",
        )
    } else {
        ScoreComponent::withheld(
            RubricCriterion::PositiveLanguage,
            "Positive or affirming phrases were missing. Encouraging words build trust with the customer.",
        )
    }
}

pub(crate) fn tone(reading: &SentimentReading) -> (ScoreComponent, Tone) {
    let tone = classify(reading);
    let component = match tone {
        Tone::Positive => ScoreComponent::awarded(
            RubricCriterion::Tone,
            FULL_AWARD,
            "The overall tone was friendly and constructive, which greatly improves customer satisfaction.",
        ),
        Tone::Neutral => ScoreComponent::awarded(
            RubricCriterion::Tone,
            NEUTRAL_TONE_AWARD,
            "The overall tone was neutral. It was not unpleasant, but more warmth and engagement would leave a better impression.",
        ),
        Tone::Rude => ScoreComponent::withheld(
            RubricCriterion::Tone,
            "The tone of the conversation came across as negative. Stay calm and respectful even on difficult calls.",
        ),
        Tone::Unknown => ScoreComponent::withheld(
            RubricCriterion::Tone,
            "Sentiment analysis could not be performed. Make sure the recording is clear and the language is supported.",
        ),
    };

    (component, tone)
}

pub(crate) fn closing(transcript: &Transcript, tone: Tone) -> ScoreComponent {
    let closed = || transcript.mentions_any(CLOSING_PHRASES);

    match tone {
        Tone::Rude => ScoreComponent::withheld(
            RubricCriterion::Closing,
            "Because the tone of the conversation was negative, the closing was not considered for scoring.",
        ),
        Tone::Positive if closed() => ScoreComponent::awarded(
            RubricCriterion::Closing,
            FULL_AWARD,
            "The call ended with a clear and polite closing, which leaves a good lasting impression.",
        ),
        Tone::Neutral if closed() => ScoreComponent::withheld(
            RubricCriterion::Closing,
            "The call ended with a proper closing, but it was not fully credited because the tone of the conversation was neutral.",
        ),
        Tone::Unknown if closed() => ScoreComponent::withheld(
            RubricCriterion::Closing,
            "The call ended with a closing, but it was not credited because the tone of the conversation could not be determined.",
        ),
        Tone::Neutral => {
            let mut component = missing_closing();
            component.feedback.push(
                "The conversation tone was also neutral, so the missing farewell weighs more heavily. A warm goodbye helps wrap up a flat call."
                    .to_string(),
            );
            component
        }
        Tone::Positive | Tone::Unknown => missing_closing(),
    }
}

fn missing_closing() -> ScoreComponent {
    ScoreComponent::withheld(
        RubricCriterion::Closing,
        "A closing statement was missing. Always end the call with a polite goodbye.",
    )
}
