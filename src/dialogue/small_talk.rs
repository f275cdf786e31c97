//! Small talk: canned answers looked up by the closest known question.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;
use crate::ml::corpus::LabeledCorpus;
use crate::ml::intent_classifier::{Classification, IntentClassifier};

/// Answers small talk from a question/answer corpus.
///
/// The corpus labels are the answers themselves.
#[derive(Debug)]
pub struct SmallTalkHandler {
    classifier: IntentClassifier,
    threshold: f64,
}

impl SmallTalkHandler {
    /// Build the handler. A corpus error leaves it answering nothing.
    pub fn new(corpus: Result<LabeledCorpus>, analyzer: Arc<dyn Analyzer>, threshold: f64) -> Self {
        SmallTalkHandler {
            classifier: IntentClassifier::from_corpus("small_talk", corpus, analyzer),
            threshold,
        }
    }

    /// The answer to the closest question, if it is close enough.
    pub fn respond(&self, utterance: &str) -> Option<String> {
        match self.classifier.classify(utterance, self.threshold) {
            Classification::Matched { label, .. } => Some(label),
            _ => None,
        }
    }

    /// The underlying classifier.
    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }
}
