use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sentiment::{SentimentError, SentimentReading};

/// Categorical tone of the call, derived from sentiment polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Neutral,
    Rude,
    /// Sentiment could not be measured.
    Unknown,
}

impl Tone {
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Positive => "Positive",
            Tone::Neutral => "Neutral",
            Tone::Rude => "Rude",
            Tone::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejects readings the thresholds cannot order (NaN, infinities).
pub(crate) fn validate_reading(reading: SentimentReading) -> SentimentReading {
    match reading {
        Ok(polarity) if !polarity.is_finite() => Err(SentimentError::InvalidPolarity(polarity)),
        other => other,
    }
}

/// Strict-zero thresholds: any favorable polarity is positive, any
/// unfavorable one is rude, and only an exact zero is neutral.
pub(crate) fn classify(reading: &SentimentReading) -> Tone {
    match reading {
        Ok(polarity) if *polarity > 0.0 => Tone::Positive,
        Ok(polarity) if *polarity < 0.0 => Tone::Rude,
        Ok(polarity) if *polarity == 0.0 => Tone::Neutral,
        Ok(_) | Err(_) => Tone::Unknown,
    }
}
