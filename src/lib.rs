//! # Maila
//!
//! A turn-based conversational agent. Each utterance is routed by a TF-IDF
//! nearest-phrase classifier to a topic handler, and short multi-turn
//! dialogues (name capture, help menus) run on top of that.
//!
//! ## Features
//!
//! - Pluggable text normalization (tokenizer + filter pipelines)
//! - TF-IDF / cosine similarity intent classification with thresholds
//! - Degraded mode instead of failures when a corpus cannot be loaded
//! - Dialogue state machine with global `cancel` and `where am i` commands
//!
//! ```
//! use maila::config::ChatConfig;
//! use maila::dialogue::DialogueManager;
//!
//! let mut manager = DialogueManager::from_config(&ChatConfig::default());
//! let reply = manager.respond("my name is Alex");
//! assert_eq!(reply.session.username(), Some("Alex"));
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod ml;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
