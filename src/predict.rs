//! Phrase prediction index.
//! Matches the current input against a fixed per-language phrase table,
//! case-insensitively, preserving table order. Pure lookup, no side effects.

use crate::language::Language;

/// Input shorter than this yields no suggestions.
const MIN_QUERY_CHARS: usize = 3;

/// Canned English phrases offered as completions.
const ENGLISH_PHRASES: &[&str] = &[
    "Hello, how are you?",
    "Good morning",
    "Thank you so much",
    "Where is the station?",
];

/// Canned Tamil phrases offered as completions.
const TAMIL_PHRASES: &[&str] = &[
    "வணக்கம், எப்படி இருக்கிறீர்கள்?",
    "காலை வணக்கம்",
    "மிக்க நன்றி",
    "நிலையம் எங்கே உள்ளது?",
];

/// Suggestion lookup over the static phrase tables.
pub struct PredictionIndex {
    english: Vec<String>,
    tamil: Vec<String>,
}

impl PredictionIndex {
    /// Index over the built-in phrase tables.
    pub fn new() -> Self {
        Self {
            english: ENGLISH_PHRASES.iter().map(|s| s.to_string()).collect(),
            tamil: TAMIL_PHRASES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Index over caller-supplied tables (embedding shells with their own
    /// phrase sets, and tests).
    pub fn with_tables(english: Vec<String>, tamil: Vec<String>) -> Self {
        Self { english, tamil }
    }

    fn table(&self, lang: Language) -> &[String] {
        match lang {
            Language::English => &self.english,
            Language::Tamil => &self.tamil,
        }
    }

    /// Return phrases for `lang` containing `text` (case-insensitive).
    /// Inputs of 2 chars or fewer return nothing. Results keep table order
    /// and are uncapped — the tables are small and fixed.
    pub fn suggest(&self, text: &str, lang: Language) -> Vec<String> {
        if text.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }
        let needle = text.to_lowercase();
        self.table(lang)
            .iter()
            .filter(|phrase| phrase.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl Default for PredictionIndex {
    fn default() -> Self {
        Self::new()
    }
}
