//! Multi-turn dialogue on top of single-turn classification.
//!
//! The [`manager::DialogueManager`] owns one conversation's [`session::SessionState`]
//! and routes each utterance either to the handler that owns the current
//! sub-state or, from the resting state, to a handler picked by the top-level
//! classifier. Handlers never mutate the session themselves: they return a
//! [`session::Transition`] which the manager applies.
//!
//! ```text
//! utterance ─► global command? ─► cancel / where am i
//!                  │
//!                  ▼
//!          state != Normal ─► owning handler (identity / discoverability)
//!                  │
//!                  ▼
//!        top-level classify ─► small talk │ questions │ identity │ discoverability │ apology
//! ```

pub mod discoverability;
pub mod identity;
pub mod keywords;
pub mod manager;
pub mod question_answering;
pub mod session;
pub mod slot;
pub mod small_talk;

pub use manager::{DialogueManager, Reply};
pub use session::{DialogueState, NameUpdate, SessionState, Transition};
