//! Noun lemmatizer.
//!
//! Reduces plural nouns to their singular dictionary form ("names" → "name",
//! "capabilities" → "capability") while leaving other words alone. This is a
//! rule-based approximation: it does not consult a dictionary, so verbs and
//! adjectives are treated like nouns.

use std::collections::HashMap;

use super::Stemmer;

/// Words ending in "s" that are not plurals, or that the suffix rules would
/// mangle.
const INVARIANT_WORDS: &[&str] = &[
    "always", "news", "perhaps", "series", "species", "thanks", "yes", "does", "goes", "plus",
    "has", "was", "this", "thus", "is", "us", "its", "his", "hers", "ours", "yours", "theirs",
    "whereas", "across", "less", "unless", "besides",
];

/// Irregular plural → singular pairs.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
];

/// Rule-based lemmatizer for English nouns.
#[derive(Debug, Clone)]
pub struct NounLemmatizer {
    irregular: HashMap<&'static str, &'static str>,
}

impl NounLemmatizer {
    /// Create a new noun lemmatizer.
    pub fn new() -> Self {
        NounLemmatizer {
            irregular: IRREGULAR_PLURALS.iter().copied().collect(),
        }
    }

    fn singularize(&self, word: &str) -> Option<String> {
        if let Some(singular) = self.irregular.get(word) {
            return Some((*singular).to_string());
        }

        if word.chars().count() <= 3 || INVARIANT_WORDS.contains(&word) {
            return None;
        }

        if let Some(stem) = word.strip_suffix("ies") {
            return Some(format!("{stem}y"));
        }

        for suffix in ["sses", "xes", "ches", "shes", "zes"] {
            if word.ends_with(suffix) {
                return Some(word[..word.len() - 2].to_string());
            }
        }

        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return None;
        }

        word.strip_suffix('s').map(str::to_string)
    }
}

impl Default for NounLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for NounLemmatizer {
    fn stem(&self, word: &str) -> String {
        self.singularize(word).unwrap_or_else(|| word.to_string())
    }

    fn name(&self) -> &'static str {
        "noun_lemmatizer"
    }
}
