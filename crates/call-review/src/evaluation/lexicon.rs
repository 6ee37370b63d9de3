use super::transcript::Transcript;

/// Phrases that must open the call for the greeting award.
pub const GREETING_PHRASES: &[&str] = &[
    "hello",
    "good morning",
    "good afternoon",
    "good evening",
    "hi",
    "namaste",
];

/// Affirming phrases rewarded anywhere in the call.
pub const POSITIVE_PHRASES: &[&str] = &[
    "thank you",
    "sure",
    "absolutely",
    "happy to help",
    "zarur",
    "dhanyavaad",
];

/// Farewells recognised by the closing check.
pub const CLOSING_PHRASES: &[&str] = &["thank you", "bye", "have a nice day", "shukriya", "alvida"];

/// A customer-need classification and the phrases that reveal it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentCategory {
    pub name: &'static str,
    pub phrases: &'static [&'static str],
}

static STANDARD_CATEGORIES: [IntentCategory; 5] = [
    IntentCategory {
        name: "refund",
        phrases: &["refund", "money back", "return"],
    },
    IntentCategory {
        name: "cancellation",
        phrases: &["cancel", "terminate", "end service"],
    },
    IntentCategory {
        name: "onboarding",
        phrases: &["start", "setup", "onboarding"],
    },
    IntentCategory {
        name: "support",
        phrases: &["help", "support", "issue", "problem", "trouble"],
    },
    IntentCategory {
        name: "billing",
        phrases: &["charge", "billing", "invoice", "payment"],
    },
];

/// Ordered intent table. Declaration order is reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentLexicon {
    categories: &'static [IntentCategory],
}

impl IntentLexicon {
    pub const fn new(categories: &'static [IntentCategory]) -> Self {
        Self { categories }
    }

    /// Refund, cancellation, onboarding, support and billing.
    pub fn standard() -> Self {
        Self::new(&STANDARD_CATEGORIES)
    }

    /// Names of every category with at least one phrase in the transcript.
    pub fn matches(&self, transcript: &Transcript) -> Vec<&'static str> {
        self.categories
            .iter()
            .filter(|category| transcript.mentions_any(category.phrases))
            .map(|category| category.name)
            .collect()
    }
}

impl Default for IntentLexicon {
    fn default() -> Self {
        Self::standard()
    }
}
