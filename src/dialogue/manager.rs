//! The dialogue manager: global commands, sub-state dispatch and top-level routing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::Analyzer;
use crate::config::ChatConfig;
use crate::dialogue::discoverability::DiscoverabilityHandler;
use crate::dialogue::identity::IdentityHandler;
use crate::dialogue::keywords::{self, Rule};
use crate::dialogue::question_answering::QuestionAnswerHandler;
use crate::dialogue::session::{DialogueState, SessionState, Transition};
use crate::dialogue::small_talk::SmallTalkHandler;
use crate::ml::corpus::CorpusKind;
use crate::ml::intent_classifier::{Classification, IntentClassifier};

const UNRECOGNIZED_REPLY: &str = "Forgive me, but I'm unable to recognize what you are saying.";
const EMPTY_REPLY: &str = "Please say something!";
const SYSTEM_ERROR_REPLY: &str = "[SYSTEM ERROR]: Error with internal classification";
const CANCELLED_REPLY: &str = "I've cancelled the current action, what now?";
const NOTHING_TO_CANCEL_REPLY: &str = "There's nothing to cancel right now.";

/// Commands honoured in every state, before any handler sees the utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GlobalCommand {
    Cancel,
    WhereAmI,
}

const GLOBAL_COMMANDS: &[Rule<GlobalCommand>] = &[
    Rule::new(&["cancel"], GlobalCommand::Cancel),
    Rule::new(&["where am i"], GlobalCommand::WhereAmI),
];

/// Labels of the top-level corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    SmallTalk,
    QuestionAnswering,
    IdentityManagement,
    Discoverability,
}

impl Topic {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "SmallTalk" => Some(Topic::SmallTalk),
            "QuestionAnswering" => Some(Topic::QuestionAnswering),
            "IdentityManagement" => Some(Topic::IdentityManagement),
            "Discoverability" => Some(Topic::Discoverability),
            _ => None,
        }
    }
}

/// The reply to one turn together with the session after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Text shown to the user.
    pub text: String,
    /// Session state after the turn.
    pub session: SessionState,
}

impl Reply {
    /// True when the reply reports an internal failure.
    pub fn is_system_error(&self) -> bool {
        self.text.starts_with("[SYSTEM ERROR]")
    }
}

/// Read-only parts shared between conversations.
#[derive(Debug)]
struct Components {
    top_level: IntentClassifier,
    top_level_threshold: f64,
    identity: IdentityHandler,
    discoverability: DiscoverabilityHandler,
    small_talk: SmallTalkHandler,
    question_answering: QuestionAnswerHandler,
}

/// Drives one conversation.
///
/// Classifier indices are built once and shared by every conversation created
/// with [`DialogueManager::new_conversation`]; only the [`SessionState`] is
/// per conversation.
///
/// # Examples
///
/// ```
/// use maila::config::ChatConfig;
/// use maila::dialogue::{DialogueManager, DialogueState};
///
/// let mut manager = DialogueManager::from_config(&ChatConfig::default());
///
/// let reply = manager.respond("help");
/// assert_eq!(reply.session.state(), DialogueState::GeneralHelpLoop);
///
/// let reply = manager.respond("cancel");
/// assert_eq!(reply.session.state(), DialogueState::Normal);
/// ```
#[derive(Debug)]
pub struct DialogueManager {
    components: Arc<Components>,
    session: SessionState,
}

impl DialogueManager {
    /// Build a manager with the normalizer the configuration asks for.
    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config, config.analyzer())
    }

    /// Build a manager with an injected normalizer.
    ///
    /// Never fails. A corpus that cannot be loaded leaves its classifier in
    /// `SystemError` mode and the conversation keeps running.
    pub fn new(config: &ChatConfig, analyzer: Arc<dyn Analyzer>) -> Self {
        let thresholds = &config.thresholds;
        let components = Components {
            top_level: IntentClassifier::from_corpus(
                "intents",
                config.load_corpus(CorpusKind::Intents),
                analyzer.clone(),
            ),
            top_level_threshold: thresholds.top_level,
            identity: IdentityHandler::new(
                config.load_corpus(CorpusKind::Identity),
                analyzer.clone(),
                thresholds.identity,
            ),
            discoverability: DiscoverabilityHandler::new(
                config.load_corpus(CorpusKind::Discoverability),
                analyzer.clone(),
                thresholds.discoverability,
                config.bot_name.clone(),
            ),
            small_talk: SmallTalkHandler::new(
                config.load_corpus(CorpusKind::SmallTalk),
                analyzer.clone(),
                thresholds.small_talk,
            ),
            question_answering: QuestionAnswerHandler::new(
                config.load_corpus(CorpusKind::QuestionAnswering),
                analyzer,
                thresholds.question_answering,
            ),
        };

        DialogueManager {
            components: Arc::new(components),
            session: SessionState::new(),
        }
    }

    /// A fresh conversation sharing this manager's indices.
    pub fn new_conversation(&self) -> Self {
        DialogueManager {
            components: Arc::clone(&self.components),
            session: SessionState::new(),
        }
    }

    /// The current session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Process one utterance and return the reply.
    pub fn respond(&mut self, utterance: &str) -> Reply {
        let transition = self.turn(utterance);
        self.session.apply(&transition);
        Reply {
            text: transition.reply,
            session: self.session.clone(),
        }
    }

    fn turn(&self, utterance: &str) -> Transition {
        if let Some(command) = keywords::first_match(GLOBAL_COMMANDS, utterance) {
            return self.global(*command);
        }

        let components = &self.components;
        match self.session.state() {
            DialogueState::AwaitingNameConfirm | DialogueState::AwaitingName => {
                components.identity.handle(utterance, &self.session)
            }
            DialogueState::GeneralHelpLoop | DialogueState::CapabilitiesHelp => {
                components.discoverability.handle(utterance, &self.session)
            }
            DialogueState::Normal => self.route(utterance),
        }
    }

    fn global(&self, command: GlobalCommand) -> Transition {
        let state = self.session.state();
        match command {
            GlobalCommand::Cancel if state.is_normal() => Transition::done(NOTHING_TO_CANCEL_REPLY),
            GlobalCommand::Cancel => {
                log::info!("Cancelled {state}");
                Transition::done(CANCELLED_REPLY)
            }
            GlobalCommand::WhereAmI => Transition::to(state.describe(), state),
        }
    }

    fn route(&self, utterance: &str) -> Transition {
        let components = &self.components;
        let label = match components
            .top_level
            .classify(utterance, components.top_level_threshold)
        {
            Classification::Matched { label, .. } => label,
            Classification::Unrecognized { .. } => return Transition::done(UNRECOGNIZED_REPLY),
            Classification::EmptyQuery => return Transition::done(EMPTY_REPLY),
            Classification::SystemError => return Transition::done(SYSTEM_ERROR_REPLY),
        };

        match Topic::from_label(&label) {
            Some(Topic::SmallTalk) => match components.small_talk.respond(utterance) {
                Some(answer) => Transition::done(answer),
                None => Transition::done(UNRECOGNIZED_REPLY),
            },
            Some(Topic::QuestionAnswering) => match components.question_answering.respond(utterance) {
                Some(answer) => Transition::done(answer),
                None => Transition::done(UNRECOGNIZED_REPLY),
            },
            Some(Topic::IdentityManagement) => components.identity.handle(utterance, &self.session),
            Some(Topic::Discoverability) => {
                components.discoverability.handle(utterance, &self.session)
            }
            None => {
                log::debug!("No handler for top-level label {label:?}");
                Transition::done(UNRECOGNIZED_REPLY)
            }
        }
    }
}
