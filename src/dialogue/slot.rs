//! Slot extraction: picking a personal name out of free text.
//!
//! This is a best-effort heuristic, not named-entity recognition. The
//! utterance is split into words; dialogue-control words, generic stop words
//! and anything not purely alphabetic are dropped, and the last surviving word
//! is taken as the name. Expect misses on short or stop-word-heavy input
//! ("I'm Will") and false hits on sentences that merely end in a noun.

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::token_filter::alphanumeric::AlphanumericFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;

/// Words used to talk about names that are never names themselves.
pub const NAME_CONTROL_WORDS: &[&str] = &[
    "call", "name", "my", "to", "please", "yes", "is", "i", "am", "know", "who", "tell", "change",
    "want", "wish", "rename", "switch", "update", "remember", "called", "go", "by", "hello", "hi",
    "hey", "new",
];

/// Uppercase the first character and lowercase the rest.
///
/// ```
/// use maila::dialogue::slot::capitalize;
///
/// assert_eq!(capitalize("aLEX"), "Alex");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Extracts a personal name from an utterance.
#[derive(Debug, Clone)]
pub struct NameExtractor {
    analyzer: PipelineAnalyzer,
}

impl NameExtractor {
    /// Create an extractor with the default control words and stop words.
    pub fn new() -> Self {
        Self::with_control_words(NAME_CONTROL_WORDS.iter().copied())
    }

    /// Create an extractor with custom dialogue-control words.
    pub fn with_control_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::default()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(AlphanumericFilter::alphabetic()))
            .add_filter(Arc::new(StopFilter::from_words(words)))
            .add_filter(Arc::new(StopFilter::extended()))
            .with_name("name_slot");

        NameExtractor { analyzer }
    }

    /// The capitalized name, or `None` when no candidate word survives.
    pub fn extract(&self, utterance: &str) -> Option<String> {
        match self.analyzer.normalize(utterance) {
            Ok(words) => words.last().map(|word| capitalize(word)),
            Err(e) => {
                log::warn!("Name extraction failed: {e}");
                None
            }
        }
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}
