//! Nearest-phrase intent classifier.
//!
//! `classify(utterance, threshold)` normalizes the utterance, vectorizes it
//! against the frozen TF-IDF index, and returns the label of the most similar
//! corpus phrase if its similarity reaches the threshold.
//!
//! Failures never surface as errors. A classifier whose corpus could not be
//! loaded or indexed enters a permanent degraded mode and answers every call
//! with [`Classification::SystemError`]; callers handle that like any other
//! label.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;
use crate::ml::corpus::LabeledCorpus;
use crate::ml::tfidf::VectorSpaceIndex;

/// Label reported for blank input.
pub const EMPTY_QUERY: &str = "EmptyQuery";
/// Label reported for below-threshold or zero-overlap input.
pub const UNRECOGNIZED: &str = "Unrecognized";
/// Label reported by a degraded classifier.
pub const SYSTEM_ERROR: &str = "SystemError";

/// Outcome of a single classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// The best phrase reached the threshold.
    Matched {
        /// Label of the best phrase.
        label: String,
        /// Cosine similarity in [0, 1].
        score: f64,
    },
    /// No phrase reached the threshold, or the input shares no vocabulary
    /// with the corpus (score 0).
    Unrecognized {
        /// Best similarity found.
        score: f64,
    },
    /// The input normalized to nothing.
    EmptyQuery,
    /// The classifier is degraded.
    SystemError,
}

impl Classification {
    /// The label, with the distinguished names for non-matches.
    pub fn label(&self) -> &str {
        match self {
            Classification::Matched { label, .. } => label,
            Classification::Unrecognized { .. } => UNRECOGNIZED,
            Classification::EmptyQuery => EMPTY_QUERY,
            Classification::SystemError => SYSTEM_ERROR,
        }
    }

    /// The similarity score (0 for empty input and system errors).
    pub fn score(&self) -> f64 {
        match self {
            Classification::Matched { score, .. } | Classification::Unrecognized { score } => {
                *score
            }
            Classification::EmptyQuery | Classification::SystemError => 0.0,
        }
    }

    /// The matched label, if any.
    pub fn matched_label(&self) -> Option<&str> {
        match self {
            Classification::Matched { label, .. } => Some(label),
            _ => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3})", self.label(), self.score())
    }
}

enum IndexState {
    Ready {
        index: VectorSpaceIndex,
        labels: Vec<String>,
    },
    Degraded(String),
}

/// TF-IDF nearest-phrase classifier over a labeled corpus.
pub struct IntentClassifier {
    name: String,
    analyzer: Arc<dyn Analyzer>,
    state: IndexState,
}

impl fmt::Debug for IntentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("IntentClassifier");
        s.field("name", &self.name)
            .field("analyzer", &self.analyzer.name());
        match &self.state {
            IndexState::Ready { index, .. } => s
                .field("rows", &index.len())
                .field("vocabulary_size", &index.vectorizer().vocabulary_size()),
            IndexState::Degraded(reason) => s.field("degraded", reason),
        };
        s.finish()
    }
}

impl IntentClassifier {
    /// Build a classifier over a corpus.
    ///
    /// Never fails: if the index cannot be built, the classifier is degraded.
    pub fn new<S: Into<String>>(
        name: S,
        corpus: LabeledCorpus,
        analyzer: Arc<dyn Analyzer>,
    ) -> Self {
        let name = name.into();
        match Self::build_index(&corpus, analyzer.as_ref()) {
            Ok(index) => {
                log::info!(
                    "Built '{}' index: {} phrases, {} terms",
                    name,
                    index.len(),
                    index.vectorizer().vocabulary_size()
                );
                let labels = corpus.rows().iter().map(|row| row.label.clone()).collect();
                IntentClassifier {
                    name,
                    analyzer,
                    state: IndexState::Ready { index, labels },
                }
            }
            Err(e) => Self::degraded(name, e.to_string(), analyzer),
        }
    }

    /// Build a classifier from the outcome of loading a corpus.
    ///
    /// A load failure yields a degraded classifier.
    pub fn from_corpus<S: Into<String>>(
        name: S,
        corpus: Result<LabeledCorpus>,
        analyzer: Arc<dyn Analyzer>,
    ) -> Self {
        match corpus {
            Ok(corpus) => Self::new(name, corpus, analyzer),
            Err(e) => Self::degraded(name, e.to_string(), analyzer),
        }
    }

    /// Create a classifier that answers every call with `SystemError`.
    pub fn degraded<S: Into<String>, R: Into<String>>(
        name: S,
        reason: R,
        analyzer: Arc<dyn Analyzer>,
    ) -> Self {
        let name = name.into();
        let reason = reason.into();
        log::error!("[SYSTEM ERROR]: '{name}' classifier unavailable: {reason}");
        IntentClassifier {
            name,
            analyzer,
            state: IndexState::Degraded(reason),
        }
    }

    fn build_index(corpus: &LabeledCorpus, analyzer: &dyn Analyzer) -> Result<VectorSpaceIndex> {
        let documents = corpus
            .rows()
            .iter()
            .map(|row| analyzer.normalize(&row.phrase))
            .collect::<Result<Vec<_>>>()?;
        VectorSpaceIndex::build(&documents)
    }

    /// Classify an utterance.
    ///
    /// Returns the label of the most similar phrase when its similarity is
    /// at least `threshold`; ties go to the earliest phrase in the corpus.
    pub fn classify(&self, utterance: &str, threshold: f64) -> Classification {
        let (index, labels) = match &self.state {
            IndexState::Ready { index, labels } => (index, labels),
            IndexState::Degraded(_) => return Classification::SystemError,
        };

        let tokens = match self.analyzer.normalize(utterance) {
            Ok(tokens) => tokens,
            Err(e) => {
                log::error!("'{}' failed to normalize input: {e}", self.name);
                return Classification::SystemError;
            }
        };
        if tokens.is_empty() {
            return Classification::EmptyQuery;
        }

        let query = index.vectorize(&tokens);
        let result = match index.best_match(&query) {
            None => Classification::Unrecognized { score: 0.0 },
            Some(best) if best.score >= threshold => Classification::Matched {
                label: labels[best.row].clone(),
                score: best.score,
            },
            Some(best) => Classification::Unrecognized { score: best.score },
        };

        log::debug!(
            "'{}' classified {:?} as {} (threshold {threshold})",
            self.name,
            utterance,
            result
        );
        result
    }

    /// Name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when the classifier answers everything with `SystemError`.
    pub fn is_degraded(&self) -> bool {
        matches!(self.state, IndexState::Degraded(_))
    }

    /// Why the classifier is degraded, if it is.
    pub fn degraded_reason(&self) -> Option<&str> {
        match &self.state {
            IndexState::Degraded(reason) => Some(reason),
            IndexState::Ready { .. } => None,
        }
    }

    /// Size of the fitted vocabulary (0 when degraded).
    pub fn vocabulary_size(&self) -> usize {
        match &self.state {
            IndexState::Ready { index, .. } => index.vectorizer().vocabulary_size(),
            IndexState::Degraded(_) => 0,
        }
    }

    /// Number of indexed phrases (0 when degraded).
    pub fn len(&self) -> usize {
        match &self.state {
            IndexState::Ready { index, .. } => index.len(),
            IndexState::Degraded(_) => 0,
        }
    }

    /// True when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::{ChatAnalyzer, FnAnalyzer};
    use crate::error::MailaError;

    fn classifier() -> IntentClassifier {
        let corpus = LabeledCorpus::from_pairs(vec![
            ("hello how are you", "SmallTalk"),
            ("good morning", "SmallTalk"),
            ("what is my name", "IdentityManagement"),
            ("call me alex", "IdentityManagement"),
            ("help me please", "Discoverability"),
            ("what can you do", "Discoverability"),
        ])
        .unwrap();
        IntentClassifier::new("test", corpus, Arc::new(ChatAnalyzer::new()))
    }

    #[test]
    fn test_exact_phrase() {
        let result = classifier().classify("What is my name?", 0.2);

        assert_eq!(result.label(), "IdentityManagement");
        assert!((result.score() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_query() {
        let classifier = classifier();

        for input in ["", "   ", "?!", "..."] {
            assert_eq!(classifier.classify(input, 0.0), Classification::EmptyQuery);
        }
    }

    #[test]
    fn test_zero_overlap_is_unrecognized() {
        let result = classifier().classify("zebras juggle pineapples", 0.0);
        assert_eq!(result, Classification::Unrecognized { score: 0.0 });
    }

    #[test]
    fn test_below_threshold_keeps_score() {
        let classifier = classifier();
        let low = classifier.classify("morning", 0.0);
        let score = low.score();
        assert!(score > 0.0 && score < 1.0);

        let result = classifier.classify("morning", 0.99);
        assert_eq!(result, Classification::Unrecognized { score });
    }

    #[test]
    fn test_idempotent() {
        let classifier = classifier();
        let first = classifier.classify("can you help me", 0.2);
        let second = classifier.classify("can you help me", 0.2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_monotonic_threshold() {
        let classifier = classifier();
        let strict = classifier.classify("what can you do for me", 0.5);
        assert_eq!(strict.matched_label(), Some("Discoverability"));

        let lenient = classifier.classify("what can you do for me", 0.1);
        assert_eq!(lenient, strict);
    }

    #[test]
    fn test_degraded_from_load_failure() {
        let classifier = IntentClassifier::from_corpus(
            "broken",
            Err(MailaError::corpus("missing file")),
            Arc::new(ChatAnalyzer::new()),
        );

        assert!(classifier.is_degraded());
        assert_eq!(classifier.degraded_reason(), Some("Corpus error: missing file"));
        assert_eq!(classifier.classify("hello", 0.0), Classification::SystemError);
        assert_eq!(classifier.classify("", 0.0), Classification::SystemError);
        assert!(classifier.is_empty());
    }

    #[test]
    fn test_degraded_when_nothing_indexable() {
        let corpus = LabeledCorpus::from_pairs(vec![("?!", "Punctuation")]).unwrap();
        let classifier = IntentClassifier::new("punct", corpus, Arc::new(ChatAnalyzer::new()));

        assert!(classifier.is_degraded());
        assert_eq!(classifier.classify("hello", 0.0).label(), SYSTEM_ERROR);
    }

    #[test]
    fn test_injected_normalizer() {
        let analyzer = FnAnalyzer::new(|text: &str| {
            text.split_whitespace().map(|w| w.to_lowercase()).collect()
        });
        let corpus = LabeledCorpus::from_pairs(vec![("Names!", "A"), ("names", "B")]).unwrap();
        let classifier = IntentClassifier::new("fn", corpus, Arc::new(analyzer));

        assert_eq!(classifier.classify("NAMES", 0.5).label(), "B");
        assert_eq!(classifier.vocabulary_size(), 2);
    }

    #[test]
    fn test_classification_display_and_json() {
        let result = Classification::Matched {
            label: "SmallTalk".to_string(),
            score: 0.5,
        };
        assert_eq!(result.to_string(), "SmallTalk (0.500)");

        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"kind":"matched","label":"SmallTalk","score":0.5}"#);
    }
}
