//! Help and discoverability: the help menus and what the bot can do.
//!
//! The general help menu and the capabilities menu are keyword driven. Each
//! menu is a table of [`Rule`]s checked in order; the first rule whose
//! keywords occur in the reply decides what happens.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::dialogue::keywords::{self, AFFIRMATIVE, NEGATIVE, Rule};
use crate::dialogue::session::{DialogueState, SessionState, Transition};
use crate::error::Result;
use crate::ml::corpus::LabeledCorpus;
use crate::ml::intent_classifier::{Classification, IntentClassifier};

/// Sub-intents of the discoverability corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    /// Open the general help menu.
    HelpGeneral,
    /// List the universal commands.
    HelpCommands,
    /// Explain how identification works.
    Identification,
    /// Summarize capabilities and open the capabilities menu.
    Capabilities,
    /// Explain what the bot is for.
    Purpose,
}

impl HelpTopic {
    /// Parse a corpus label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "HelpGeneral" => Some(HelpTopic::HelpGeneral),
            "HelpCommands" => Some(HelpTopic::HelpCommands),
            "Identification" => Some(HelpTopic::Identification),
            "Capabilities" => Some(HelpTopic::Capabilities),
            "Purpose" => Some(HelpTopic::Purpose),
            _ => None,
        }
    }
}

/// What a menu rule does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    /// Leave the menu with "Very well.".
    Exit,
    /// Answer a topic as if asked from the resting state.
    Topic(HelpTopic),
    /// Reply and stay in the menu.
    Stay(&'static str),
    /// Reply and return to the resting state.
    Finish(&'static str),
}

const EXIT_REPLY: &str = "Very well.";

const GENERAL_HELP_RULES: &[Rule<LoopAction>] = &[
    Rule::new(NEGATIVE, LoopAction::Exit),
    Rule::new(&["commands", "command"], LoopAction::Topic(HelpTopic::HelpCommands)),
    Rule::new(
        &["identification", "name", "identity"],
        LoopAction::Topic(HelpTopic::Identification),
    ),
    Rule::new(
        &["capable", "capabilities", "do"],
        LoopAction::Topic(HelpTopic::Capabilities),
    ),
    Rule::new(
        &["yes", "affirmative"],
        LoopAction::Stay(
            "I can certainly tell you more, just specify what you would like me to elaborate on! \
             Commands, identification, or my capabilities?",
        ),
    ),
];

const GENERAL_HELP_FALLBACK: &str =
    "I couldn't understand your reply, do you still need general help?";

const CAPABILITIES_RULES: &[Rule<LoopAction>] = &[
    Rule::new(NEGATIVE, LoopAction::Exit),
    Rule::new(
        &["yes", "ok", "alright"],
        LoopAction::Stay(
            "Alright, ask me about small talk, question and answering, identification, \
             or email services for more information.",
        ),
    ),
    Rule::new(
        &["small", "talk", "talking", "conversation", "chat", "chatting"],
        LoopAction::Finish(
            "I'm happy to have small talk if that's what you would like, just talk to me!",
        ),
    ),
    Rule::new(
        &["question", "questions", "answer", "answers", "answering"],
        LoopAction::Finish(
            "I have a wide variety of knowledge! Ask me something and I'll do my best to answer it!",
        ),
    ),
    Rule::new(
        &["identification", "name", "identity"],
        LoopAction::Topic(HelpTopic::Identification),
    ),
    Rule::new(
        &["email", "emails"],
        LoopAction::Finish(
            "I am capable of generating you a temporary email for use! As well as managing \
             emails received at that address, if you wish to get started, ask me to generate \
             you an email!",
        ),
    ),
];

const CAPABILITIES_FALLBACK: &str =
    "I couldn't understand your reply, do you still need help regarding my capabilities?";

/// Handler for the help menus.
#[derive(Debug)]
pub struct DiscoverabilityHandler {
    classifier: IntentClassifier,
    threshold: f64,
    bot_name: String,
}

impl DiscoverabilityHandler {
    /// Create a handler from a loaded discoverability corpus.
    pub fn new<S: Into<String>>(
        corpus: Result<LabeledCorpus>,
        analyzer: Arc<dyn Analyzer>,
        threshold: f64,
        bot_name: S,
    ) -> Self {
        DiscoverabilityHandler {
            classifier: IntentClassifier::from_corpus("discoverability", corpus, analyzer),
            threshold,
            bot_name: bot_name.into(),
        }
    }

    /// Handle one turn for a session that is `Normal` or in a help menu.
    pub fn handle(&self, utterance: &str, session: &SessionState) -> Transition {
        match session.state() {
            DialogueState::GeneralHelpLoop => {
                self.menu(GENERAL_HELP_RULES, GENERAL_HELP_FALLBACK, utterance, session.state())
            }
            DialogueState::CapabilitiesHelp => {
                self.menu(CAPABILITIES_RULES, CAPABILITIES_FALLBACK, utterance, session.state())
            }
            _ => self.answer(utterance),
        }
    }

    fn answer(&self, utterance: &str) -> Transition {
        match self.classifier.classify(utterance, self.threshold) {
            Classification::Matched { label, .. } => match HelpTopic::from_label(&label) {
                Some(topic) => self.topic(topic),
                None => {
                    log::warn!("Discoverability handler has no reply for label {label:?}");
                    Self::not_understood()
                }
            },
            Classification::SystemError => {
                Transition::done("[SYSTEM ERROR]: Error in help processing.")
            }
            _ => Self::not_understood(),
        }
    }

    fn not_understood() -> Transition {
        Transition::done("I unfortunately can't understand what you are asking for help with.")
    }

    fn menu(
        &self,
        rules: &[Rule<LoopAction>],
        fallback: &'static str,
        utterance: &str,
        state: DialogueState,
    ) -> Transition {
        match keywords::first_match(rules, utterance) {
            Some(LoopAction::Exit) => Transition::done(EXIT_REPLY),
            Some(LoopAction::Topic(topic)) => self.topic(*topic),
            Some(LoopAction::Stay(reply)) => Transition::to(*reply, state),
            Some(LoopAction::Finish(reply)) => Transition::done(*reply),
            None => Transition::to(fallback, state),
        }
    }

    /// The reply for a topic, with the state it leads to.
    pub fn topic(&self, topic: HelpTopic) -> Transition {
        match topic {
            HelpTopic::HelpGeneral => Transition::to(
                "What do you need help with? Would you like any further information on \
                 commands, identification, or my capabilities?",
                DialogueState::GeneralHelpLoop,
            ),
            HelpTopic::HelpCommands => Transition::done(
                "These commands work at any point in our conversation: \
                 'WHERE AM I' tells you what I'm waiting for, \
                 'CANCEL' stops the current action, \
                 and 'STOP' or 'QUIT' ends the conversation.",
            ),
            HelpTopic::Identification => Transition::done(
                "If you tell me your name or tell me that you want to set your name, I am \
                 capable of remembering it. You can also change your name, or tell me to \
                 forget it entirely.",
            ),
            HelpTopic::Capabilities => Transition::to(
                "I am capable of basic small talk, question and answering, identity management, \
                 and generating you a temporary email, would you like any further information \
                 on any of these?",
                DialogueState::CapabilitiesHelp,
            ),
            HelpTopic::Purpose => Transition::done(format!(
                "I am {}, an AI-powered Chatbot. I'm here to chat with you, answer your \
                 questions, and assist you with setting up a temporary email address in a \
                 conversational manner.",
                self.bot_name
            )),
        }
    }

    /// The underlying classifier.
    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }
}
