//! Identity handling: remembering, changing and forgetting the user's name.
//!
//! | state                 | input                     | reply / next state                    |
//! |-----------------------|---------------------------|---------------------------------------|
//! | Normal                | Identification, no name   | offer to set it → AwaitingNameConfirm |
//! | Normal                | Identification, name      | "You are {name}." → Normal            |
//! | Normal                | NameDirect                | extract name, store → Normal          |
//! | Normal                | NameChange                | prompt → AwaitingName                 |
//! | Normal                | NameDelete                | forget → Normal                       |
//! | AwaitingNameConfirm   | affirmative               | prompt → AwaitingName                 |
//! | AwaitingNameConfirm   | negative                  | → Normal                              |
//! | AwaitingNameConfirm   | anything else             | re-prompt, stay                       |
//! | AwaitingName          | non-empty text            | store text as name → Normal           |
//! | AwaitingName          | empty                     | re-prompt, stay                       |

use std::str::FromStr;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::dialogue::keywords::{self, AFFIRMATIVE, NEGATIVE, Rule};
use crate::dialogue::session::{DialogueState, NameUpdate, SessionState, Transition};
use crate::dialogue::slot::{NameExtractor, capitalize};
use crate::error::Result;
use crate::ml::corpus::LabeledCorpus;
use crate::ml::intent_classifier::{Classification, IntentClassifier};

/// Sub-intents of the identity corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityIntent {
    /// Ask for (or confirm) the remembered name.
    Identification,
    /// The name is stated inline, e.g. "I am Alex".
    NameDirect,
    /// Explicit request to change the name.
    NameChange,
    /// Request to forget the name.
    NameDelete,
    /// Nothing in the identity corpus matched.
    Unrecognized,
    /// The identity classifier is degraded.
    SystemError,
    /// A label the handler does not know.
    Other(String),
}

impl FromStr for IdentityIntent {
    type Err = std::convert::Infallible;

    fn from_str(label: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match label {
            "Identification" => IdentityIntent::Identification,
            "NameDirect" => IdentityIntent::NameDirect,
            "NameChange" => IdentityIntent::NameChange,
            "NameDelete" => IdentityIntent::NameDelete,
            "Unrecognized" | "EmptyQuery" => IdentityIntent::Unrecognized,
            "SystemError" => IdentityIntent::SystemError,
            other => IdentityIntent::Other(other.to_string()),
        })
    }
}

impl From<&Classification> for IdentityIntent {
    fn from(classification: &Classification) -> Self {
        match classification {
            Classification::Matched { label, .. } => label
                .parse()
                .unwrap_or(IdentityIntent::Other(label.clone())),
            Classification::Unrecognized { .. } | Classification::EmptyQuery => {
                IdentityIntent::Unrecognized
            }
            Classification::SystemError => IdentityIntent::SystemError,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ConfirmAction {
    Accept,
    Decline,
}

const CONFIRM_RULES: &[Rule<ConfirmAction>] = &[
    Rule::new(AFFIRMATIVE, ConfirmAction::Accept),
    Rule::new(NEGATIVE, ConfirmAction::Decline),
];

/// Handler for the identity topic.
#[derive(Debug)]
pub struct IdentityHandler {
    classifier: IntentClassifier,
    threshold: f64,
    extractor: NameExtractor,
}

impl IdentityHandler {
    /// Create a handler from a loaded identity corpus.
    pub fn new(corpus: Result<LabeledCorpus>, analyzer: Arc<dyn Analyzer>, threshold: f64) -> Self {
        IdentityHandler {
            classifier: IntentClassifier::from_corpus("identity", corpus, analyzer),
            threshold,
            extractor: NameExtractor::new(),
        }
    }

    /// Classify an utterance against the identity corpus.
    pub fn classify(&self, utterance: &str) -> IdentityIntent {
        IdentityIntent::from(&self.classifier.classify(utterance, self.threshold))
    }

    /// Handle one turn for a session that is `Normal` or in an identity state.
    pub fn handle(&self, utterance: &str, session: &SessionState) -> Transition {
        let intent = if session.state().is_normal() {
            self.classify(utterance)
        } else {
            IdentityIntent::Unrecognized
        };
        self.respond(utterance, session.username(), &intent, session.state())
    }

    /// Produce the reply for a known sub-intent and state.
    ///
    /// In an identity sub-state the intent is ignored and the utterance is
    /// read as the answer to the pending question.
    pub fn respond(
        &self,
        utterance: &str,
        username: Option<&str>,
        intent: &IdentityIntent,
        state: DialogueState,
    ) -> Transition {
        let utterance = utterance.trim();

        match state {
            DialogueState::AwaitingNameConfirm => return Self::confirm(utterance),
            DialogueState::AwaitingName => return Self::take_name(utterance),
            _ => {}
        }

        match intent {
            IdentityIntent::Identification => match username {
                Some(name) => Transition::done(format!("You are {name}.")),
                None => Transition::to(
                    "I don't think you've told me your name yet, would you like to set it?",
                    DialogueState::AwaitingNameConfirm,
                ),
            },
            IdentityIntent::NameDirect => match (self.extractor.extract(utterance), username) {
                (Some(new_name), Some(old_name)) => Transition::done(format!(
                    "{old_name}, you want to be called {new_name} now? Very well!"
                ))
                .with_name(NameUpdate::Set(new_name)),
                (Some(new_name), None) => {
                    Transition::done(format!("Nice to meet you, {new_name}. I'll remember you."))
                        .with_name(NameUpdate::Set(new_name))
                }
                (None, _) => Transition::done("I couldn't quite catch your name there."),
            },
            IdentityIntent::NameChange => {
                Transition::to("Very well! Type in your name below!", DialogueState::AwaitingName)
            }
            IdentityIntent::NameDelete => match username {
                Some(name) => Transition::done(format!("I've forgotten your name, {name}."))
                    .with_name(NameUpdate::Clear),
                None => Transition::done("I don't think I know your name yet."),
            },
            IdentityIntent::Unrecognized => {
                Transition::done("I'm not sure what you mean about your name.")
            }
            IdentityIntent::SystemError => {
                Transition::done("[SYSTEM ERROR]: Error in identity processing.")
            }
            IdentityIntent::Other(label) => {
                log::warn!("Identity handler has no reply for label {label:?}");
                Transition::done("I'm not sure how to handle that request about your name.")
            }
        }
    }

    fn confirm(utterance: &str) -> Transition {
        match keywords::first_match(CONFIRM_RULES, utterance) {
            Some(ConfirmAction::Accept) => Transition::to(
                "Very well! Simply tell me your name please!",
                DialogueState::AwaitingName,
            ),
            Some(ConfirmAction::Decline) => Transition::done("Alright then!"),
            None => Transition::to(
                "I couldn't understand your reply, can you try again? (Yes/No/Cancel)",
                DialogueState::AwaitingNameConfirm,
            ),
        }
    }

    fn take_name(utterance: &str) -> Transition {
        if utterance.is_empty() {
            return Transition::to(
                "I didn't quite get that, please type in your name below!",
                DialogueState::AwaitingName,
            );
        }
        let name = capitalize(utterance);
        Transition::done(format!("Got it, you are {name}!")).with_name(NameUpdate::Set(name))
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
    use crate::ml::corpus::CorpusKind;

    fn handler() -> IdentityHandler {
        IdentityHandler::new(
            LabeledCorpus::builtin(CorpusKind::Identity),
            Arc::new(ChatAnalyzer::new()),
            0.3,
        )
    }

    #[test]
    fn test_classify_sub_intents() {
        let handler = handler();

        assert_eq!(handler.classify("what is my name"), IdentityIntent::Identification);
        assert_eq!(handler.classify("my name is Alex"), IdentityIntent::NameDirect);
        assert_eq!(handler.classify("change my name"), IdentityIntent::NameChange);
        assert_eq!(handler.classify("forget my name"), IdentityIntent::NameDelete);
        assert_eq!(handler.classify("purple elephants"), IdentityIntent::Unrecognized);
    }

    #[test]
    fn test_identification() {
        let handler = handler();
        let intent = IdentityIntent::Identification;

        let t = handler.respond("who am i", None, &intent, DialogueState::Normal);
        assert_eq!(t.next, DialogueState::AwaitingNameConfirm);
        assert_eq!(t.name, NameUpdate::Keep);

        let t = handler.respond("who am i", Some("Alex"), &intent, DialogueState::Normal);
        assert_eq!(t.reply, "You are Alex.");
        assert_eq!(t.next, DialogueState::Normal);
    }

    #[test]
    fn test_confirm_state() {
        let handler = handler();
        let intent = IdentityIntent::Unrecognized;
        let state = DialogueState::AwaitingNameConfirm;

        assert_eq!(handler.respond("yes", None, &intent, state).next, DialogueState::AwaitingName);
        assert_eq!(handler.respond("ok sure", None, &intent, state).next, DialogueState::AwaitingName);
        assert_eq!(handler.respond("no", None, &intent, state).next, DialogueState::Normal);
        assert_eq!(handler.respond("maybe later", None, &intent, state).next, state);
        assert_eq!(handler.respond("I know", None, &intent, state).next, state);
    }

    #[test]
    fn test_awaiting_name() {
        let handler = handler();
        let intent = IdentityIntent::Unrecognized;

        let t = handler.respond("  alex ", None, &intent, DialogueState::AwaitingName);
        assert_eq!(t.reply, "Got it, you are Alex!");
        assert_eq!(t.name, NameUpdate::Set("Alex".to_string()));
        assert_eq!(t.next, DialogueState::Normal);

        let t = handler.respond("   ", None, &intent, DialogueState::AwaitingName);
        assert_eq!(t.next, DialogueState::AwaitingName);
        assert_eq!(t.name, NameUpdate::Keep);
    }

    #[test]
    fn test_name_direct() {
        let handler = handler();
        let intent = IdentityIntent::NameDirect;

        let t = handler.respond("my name is alex", None, &intent, DialogueState::Normal);
        assert_eq!(t.reply, "Nice to meet you, Alex. I'll remember you.");
        assert_eq!(t.name, NameUpdate::Set("Alex".to_string()));

        let t = handler.respond("call me sam", Some("Alex"), &intent, DialogueState::Normal);
        assert_eq!(t.reply, "Alex, you want to be called Sam now? Very well!");

        let t = handler.respond("my name is", Some("Alex"), &intent, DialogueState::Normal);
        assert_eq!(t.reply, "I couldn't quite catch your name there.");
        assert_eq!(t.name, NameUpdate::Keep);
    }

    #[test]
    fn test_name_change_and_delete() {
        let handler = handler();

        let t = handler.respond("", None, &IdentityIntent::NameChange, DialogueState::Normal);
        assert_eq!(t.next, DialogueState::AwaitingName);

        let delete = IdentityIntent::NameDelete;
        let t = handler.respond("", Some("Alex"), &delete, DialogueState::Normal);
        assert_eq!(t.reply, "I've forgotten your name, Alex.");
        assert_eq!(t.name, NameUpdate::Clear);

        let t = handler.respond("", None, &delete, DialogueState::Normal);
        assert_eq!(t.reply, "I don't think I know your name yet.");
        assert_eq!(t.name, NameUpdate::Keep);
    }

    #[test]
    fn test_degraded_classifier() {
        let handler = IdentityHandler::new(
            Err(crate::error::MailaError::corpus("gone")),
            Arc::new(ChatAnalyzer::new()),
            0.3,
        );

        let t = handler.handle("what is my name", &SessionState::new());
        assert_eq!(t.reply, "[SYSTEM ERROR]: Error in identity processing.");
        assert_eq!(t.next, DialogueState::Normal);
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(
            "Mystery".parse::<IdentityIntent>().unwrap(),
            IdentityIntent::Other("Mystery".to_string())
        );
    }
}
