//! Conversation state and state transitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the conversation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    /// Resting state; the top-level classifier picks a handler.
    #[default]
    Normal,
    /// Asked whether the user wants to set a name; expecting yes/no.
    AwaitingNameConfirm,
    /// Expecting the user's name verbatim.
    AwaitingName,
    /// Inside the general help menu.
    GeneralHelpLoop,
    /// Inside the capabilities help menu.
    CapabilitiesHelp,
}

impl DialogueState {
    /// Snake-case name of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogueState::Normal => "normal",
            DialogueState::AwaitingNameConfirm => "awaiting_name_confirm",
            DialogueState::AwaitingName => "awaiting_name",
            DialogueState::GeneralHelpLoop => "general_help_loop",
            DialogueState::CapabilitiesHelp => "capabilities_help",
        }
    }

    /// User-facing description, answered to "where am i".
    pub fn describe(&self) -> &'static str {
        match self {
            DialogueState::Normal => {
                "We're just chatting, nothing is in progress. Ask me anything!"
            }
            DialogueState::AwaitingNameConfirm => {
                "I'm waiting for you to tell me whether you'd like to set your name. (Yes/No/Cancel)"
            }
            DialogueState::AwaitingName => "I'm waiting for you to type in your name.",
            DialogueState::GeneralHelpLoop => {
                "We're in the general help menu. Ask about commands, identification, or my capabilities."
            }
            DialogueState::CapabilitiesHelp => {
                "We're going over my capabilities. Ask about small talk, question answering, identification, or email."
            }
        }
    }

    /// True for the resting state.
    pub fn is_normal(&self) -> bool {
        matches!(self, DialogueState::Normal)
    }
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a transition does to the remembered username.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NameUpdate {
    /// Leave it as it is.
    #[default]
    Keep,
    /// Remember a new name.
    Set(String),
    /// Forget the name.
    Clear,
}

/// A handler's answer to one turn: the reply text and the state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Text shown to the user.
    pub reply: String,
    /// State after this turn.
    pub next: DialogueState,
    /// Change to the remembered username.
    pub name: NameUpdate,
}

impl Transition {
    /// Reply and move to `next`, keeping the username.
    pub fn to<S: Into<String>>(reply: S, next: DialogueState) -> Self {
        Transition {
            reply: reply.into(),
            next,
            name: NameUpdate::Keep,
        }
    }

    /// Reply and return to `Normal`.
    pub fn done<S: Into<String>>(reply: S) -> Self {
        Self::to(reply, DialogueState::Normal)
    }

    /// Attach a username change.
    pub fn with_name(mut self, name: NameUpdate) -> Self {
        self.name = name;
        self
    }
}

/// State of one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    username: Option<String>,
    state: DialogueState,
}

impl SessionState {
    /// A fresh conversation: no name, `Normal`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The remembered username.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The current state.
    pub fn state(&self) -> DialogueState {
        self.state
    }

    /// Apply a handler's transition.
    pub(crate) fn apply(&mut self, transition: &Transition) {
        if self.state != transition.next {
            log::info!("Dialogue state {} -> {}", self.state, transition.next);
        }
        self.state = transition.next;

        match &transition.name {
            NameUpdate::Keep => {}
            NameUpdate::Set(name) => {
                log::info!("Remembering username {name:?}");
                self.username = Some(name.clone());
            }
            NameUpdate::Clear => {
                log::info!("Forgetting username");
                self.username = None;
            }
        }
    }
}
