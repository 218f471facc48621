// crates/campus-care-server/src/crisis/mod.rs
// Crisis keyword gate - evaluated before any model call

mod safety;

pub use safety::CRISIS_REPLY;

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Canonical phrase list. Each phrase matches at the start of a word and may
/// run on into a longer word ("hopeless" matches "hopelessly").
pub const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end it all",
    "end my life",
    "hurt myself",
    "harm myself",
    "self harm",
    "self-harm",
    "want to die",
    "take my life",
    "can't go on",
    "cant go on",
    "hopeless",
    "in danger",
    "no reason to live",
    "better off dead",
];

static DEFAULT_DETECTOR: LazyLock<CrisisDetector> = LazyLock::new(CrisisDetector::new);

/// Check text against the canonical phrase list
pub fn is_crisis(text: &str) -> bool {
    DEFAULT_DETECTOR.is_crisis(text)
}

/// Phrase-list matcher. Never fails on input; an empty string is never a crisis.
#[derive(Debug, Clone)]
pub struct CrisisDetector {
    patterns: Vec<(String, Regex)>,
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CrisisDetector {
    /// Detector over the canonical phrase list
    pub fn new() -> Self {
        Self::with_extra_phrases(std::iter::empty::<&str>())
    }

    /// Canonical list plus site-specific phrases. Phrases that are blank,
    /// duplicated, or fail to compile are skipped with a warning.
    pub fn with_extra_phrases<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns: Vec<(String, Regex)> = Vec::new();
        let canonical = CRISIS_PHRASES.iter().map(|p| p.to_string());
        let extra = extra.into_iter().map(|p| p.as_ref().trim().to_lowercase());

        for phrase in canonical.chain(extra) {
            if phrase.is_empty() || patterns.iter().any(|(p, _)| *p == phrase) {
                continue;
            }
            match Regex::new(&phrase_pattern(&phrase)) {
                Ok(re) => patterns.push((phrase, re)),
                Err(e) => warn!(phrase = %phrase, error = %e, "Skipping crisis phrase"),
            }
        }

        debug!(phrase_count = patterns.len(), "Crisis detector ready");
        Self { patterns }
    }

    /// True if any phrase occurs at a word start
    pub fn is_crisis(&self, text: &str) -> bool {
        self.matched_phrase(text).is_some()
    }

    /// First phrase (in list order) found in the text
    pub fn matched_phrase(&self, text: &str) -> Option<&str> {
        if text.trim().is_empty() {
            return None;
        }
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(phrase, _)| phrase.as_str())
    }

    pub fn phrase_count(&self) -> usize {
        self.patterns.len()
    }
}

/// Build a case-insensitive, word-start anchored pattern for a phrase.
/// Spaces accept any whitespace run; apostrophes accept the curly forms.
fn phrase_pattern(phrase: &str) -> String {
    let words: Vec<String> = phrase
        .split_whitespace()
        .map(|word| {
            word.split('\'')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("['\u{2018}\u{2019}]")
        })
        .collect();
    format!(r"(?i)\b{}", words.join(r"\s+"))
}
