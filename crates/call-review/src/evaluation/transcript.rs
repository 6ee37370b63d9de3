use std::fmt;

/// Full text of one call. Matching always runs against the lower-cased copy;
/// the raw text is kept for sentiment scoring and persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    raw: String,
    folded: String,
}

impl Transcript {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Prefix match, ignoring leading whitespace left over by transcription.
    pub(crate) fn opens_with_any(&self, phrases: &[&str]) -> bool {
        let opening = self.folded.trim_start();
        phrases.iter().any(|phrase| opening.starts_with(phrase))
    }

    pub(crate) fn mentions_any(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|phrase| self.folded.contains(phrase))
    }
}

impl From<String> for Transcript {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Transcript {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for Transcript {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
