//! Language pair and script-heuristic detection.
//! Exactly two languages are supported; the detector classifies input by
//! character script (basic Latin vs. anything else), not by real language
//! identification. Mixed-script or very short input can misclassify — that is
//! a documented limitation of the heuristic.

use serde::Serialize;

/// The two supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    English,
    Tamil,
}

impl Language {
    /// Two-letter code understood by the translation backend.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Tamil => "ta",
        }
    }

    /// BCP-47 locale used for speech capture and playback.
    pub fn speech_locale(self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Tamil => "ta-IN",
        }
    }

}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Tamil => write!(f, "Tamil"),
        }
    }
}

/// Minimum length before an all-ASCII input may flip the pair away from
/// Tamil. Short fragments are transliteration-ambiguous.
const ASCII_FLIP_MIN_LEN: usize = 4;

/// Returns true if `text` contains any character outside basic Latin.
fn has_non_ascii(text: &str) -> bool {
    text.chars().any(|c| !c.is_ascii())
}

/// Classify `text` and decide whether the active pair should flip.
///
/// Returns `Some((new_source, new_target))` when the pair should change:
/// - non-ASCII script while source is English → (Tamil, English)
/// - all-ASCII while source is Tamil and the text is longer than 3 chars →
///   (English, Tamil)
///
/// The length guard is deliberately asymmetric: a single Tamil character is
/// unambiguous, a short Latin fragment is not.
pub fn detect(text: &str, current_source: Language) -> Option<(Language, Language)> {
    if has_non_ascii(text) {
        if current_source == Language::English {
            return Some((Language::Tamil, Language::English));
        }
    } else if current_source == Language::Tamil && text.chars().count() >= ASCII_FLIP_MIN_LEN {
        return Some((Language::English, Language::Tamil));
    }
    None
}
