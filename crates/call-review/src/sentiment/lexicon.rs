use super::{SentimentError, SentimentReading, SentimentScorer};

// Word polarities in [-1.0, 1.0].
const POLARITIES: &[(&str, f32)] = &[
    ("absolutely", 0.2),
    ("amazing", 0.6),
    ("appreciate", 0.5),
    ("awesome", 1.0),
    ("best", 1.0),
    ("delighted", 0.8),
    ("excellent", 1.0),
    ("fantastic", 0.4),
    ("fine", 0.4),
    ("friendly", 0.4),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("kind", 0.6),
    ("love", 0.5),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleasure", 0.5),
    ("pleased", 0.5),
    ("resolved", 0.3),
    ("sure", 0.5),
    ("thank", 0.2),
    ("thanks", 0.2),
    ("welcome", 0.8),
    ("wonderful", 1.0),
    ("angry", -0.5),
    ("annoyed", -0.4),
    ("annoying", -0.6),
    ("awful", -1.0),
    ("bad", -0.7),
    ("disappointed", -0.75),
    ("disgusting", -1.0),
    ("dumb", -0.4),
    ("frustrated", -0.7),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("idiot", -0.8),
    ("incompetent", -0.5),
    ("nonsense", -0.3),
    ("pathetic", -1.0),
    ("poor", -0.4),
    ("ridiculous", -0.3),
    ("rude", -0.3),
    ("sorry", -0.5),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("unacceptable", -0.5),
    ("upset", -0.3),
    ("useless", -0.5),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f32)] = &[
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("really", 1.3),
    ("so", 1.2),
    ("too", 1.2),
    ("very", 1.3),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "doesn't", "didn't", "isn't", "wasn't", "aren't",
    "can't", "cannot", "won't", "nothing",
];

/// Negated words flip and soften.
const NEGATION_FACTOR: f32 = -0.5;

/// Averages word polarities with one-word intensifiers and two-word negation
/// look-back. Text without any recognised words scores exactly `0.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentimentScorer;

impl LexiconSentimentScorer {
    pub fn new() -> Self {
        Self
    }

    fn word_polarity(word: &str) -> Option<f32> {
        POLARITIES
            .iter()
            .find(|(entry, _)| *entry == word)
            .map(|(_, polarity)| *polarity)
    }

    fn intensity(word: &str) -> Option<f32> {
        INTENSIFIERS
            .iter()
            .find(|(entry, _)| *entry == word)
            .map(|(_, factor)| *factor)
    }
}

/// Typographic apostrophes fold to `'`, keeping "don’t" one token.
fn tokenize(text: &str) -> Vec<String> {
    text.replace(['\u{2018}', '\u{2019}', '\u{02BC}'], "'")
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|token| token.trim_matches('\'').to_lowercase())
        .filter(|token| !token.is_empty())
        .collect()
}

impl SentimentScorer for LexiconSentimentScorer {
    fn polarity(&self, text: &str) -> SentimentReading {
        if text.trim().is_empty() {
            return Err(SentimentError::EmptyText);
        }

        let tokens = tokenize(text);
        if !tokens
            .iter()
            .any(|token| token.chars().any(|c| c.is_ascii_alphabetic()))
        {
            return Err(SentimentError::UnsupportedLanguage);
        }

        let mut scores = Vec::new();
        for (index, token) in tokens.iter().enumerate() {
            let Some(mut polarity) = Self::word_polarity(token) else {
                continue;
            };

            if let Some(factor) = index
                .checked_sub(1)
                .and_then(|previous| Self::intensity(&tokens[previous]))
            {
                polarity *= factor;
            }

            let window = &tokens[index.saturating_sub(2)..index];
            if window.iter().any(|word| NEGATIONS.contains(&word.as_str())) {
                polarity *= NEGATION_FACTOR;
            }

            scores.push(polarity.clamp(-1.0, 1.0));
        }

        if scores.is_empty() {
            return Ok(0.0);
        }

        let mean = scores.iter().sum::<f32>() / scores.len() as f32;
        Ok(mean.clamp(-1.0, 1.0))
    }
}
