//! Factual questions answered from a question/answer corpus.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::error::Result;
use crate::ml::corpus::LabeledCorpus;
use crate::ml::intent_classifier::{Classification, IntentClassifier};

/// Answers factual questions with the answer of the closest known question.
///
/// Labels of the corpus are the answers.
#[derive(Debug)]
pub struct QuestionAnswerHandler {
    classifier: IntentClassifier,
    threshold: f64,
}

impl QuestionAnswerHandler {
    /// Build the handler. A corpus error leaves it answering nothing.
    pub fn new(corpus: Result<LabeledCorpus>, analyzer: Arc<dyn Analyzer>, threshold: f64) -> Self {
        QuestionAnswerHandler {
            classifier: IntentClassifier::from_corpus("question_answering", corpus, analyzer),
            threshold,
        }
    }

    /// The answer to the closest question, if it is close enough.
    pub fn respond(&self, utterance: &str) -> Option<String> {
        match self.classifier.classify(utterance, self.threshold) {
            Classification::Matched { label, .. } => Some(label),
            other => {
                log::debug!("No answer for {utterance:?}: {other}");
                None
            }
        }
    }

    /// The underlying classifier.
    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::ChatAnalyzer;
    use crate::error::MailaError;
    use crate::ml::corpus::CorpusKind;

    fn handler(threshold: f64) -> QuestionAnswerHandler {
        QuestionAnswerHandler::new(
            LabeledCorpus::builtin(CorpusKind::QuestionAnswering),
            Arc::new(ChatAnalyzer::new()),
            threshold,
        )
    }

    #[test]
    fn test_respond() {
        let handler = handler(0.65);

        assert_eq!(
            handler.respond("What is the capital of France?").as_deref(),
            Some("The capital of France is Paris.")
        );
        assert_eq!(
            handler.respond("who painted the Mona Lisa").as_deref(),
            Some("The Mona Lisa was painted by Leonardo da Vinci.")
        );
        assert_eq!(handler.respond("xylophone zeppelin"), None);
        assert_eq!(handler.respond("?!"), None);
    }

    #[test]
    fn test_partial_question() {
        let lenient = handler(0.65);
        assert!(
            lenient
                .respond("what is the tallest mountain")
                .is_some_and(|answer| answer.starts_with("Mount Everest"))
        );

        let strict = handler(0.95);
        assert_eq!(strict.respond("what is the tallest mountain"), None);
    }

    #[test]
    fn test_degraded() {
        let handler = QuestionAnswerHandler::new(
            Err(MailaError::corpus("missing")),
            Arc::new(ChatAnalyzer::new()),
            0.65,
        );
        assert!(handler.classifier().is_degraded());
        assert_eq!(handler.respond("what is the capital of france"), None);
    }
}
