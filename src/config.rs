//! Configuration for a chat session.
//!
//! # Examples
//!
//! ```
//! use maila::config::ChatConfig;
//!
//! let config = ChatConfig::default();
//! assert_eq!(config.bot_name, "Maila");
//! assert_eq!(config.thresholds.top_level, 0.2);
//!
//! let config = ChatConfig::from_json_str(r#"{"bot_name": "Robin"}"#).unwrap();
//! assert_eq!(config.bot_name, "Robin");
//! assert_eq!(config.thresholds.small_talk, 0.4);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, ChatAnalyzer};
use crate::error::{MailaError, Result};
use crate::ml::corpus::{CorpusKind, LabeledCorpus};

/// Top-level chat configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Name the bot introduces itself with.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,

    /// Similarity thresholds per classifier.
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Corpus files replacing the built-in corpora.
    #[serde(default)]
    pub corpora: CorpusPaths,

    /// Reduce plural nouns to their singular form while normalizing.
    #[serde(default = "default_true")]
    pub lemmatize: bool,
}

fn default_bot_name() -> String {
    "Maila".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            thresholds: Thresholds::default(),
            corpora: CorpusPaths::default(),
            lemmatize: true,
        }
    }
}

impl ChatConfig {
    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ChatConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            MailaError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Check that every threshold lies in [0, 1] and the bot has a name.
    pub fn validate(&self) -> Result<()> {
        if self.bot_name.trim().is_empty() {
            return Err(MailaError::config("bot_name must not be empty"));
        }
        for kind in CorpusKind::ALL {
            let value = self.thresholds.get(kind);
            if !(0.0..=1.0).contains(&value) {
                return Err(MailaError::config(format!(
                    "{kind} threshold must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Load one corpus: the configured file if any, otherwise the built-in one.
    pub fn load_corpus(&self, kind: CorpusKind) -> Result<LabeledCorpus> {
        let result = LabeledCorpus::load(kind, self.corpora.get(kind));
        if let Err(e) = &result {
            log::error!("Failed to load {kind} corpus: {e}");
        }
        result
    }

    /// The normalizer this configuration asks for.
    pub fn analyzer(&self) -> Arc<dyn Analyzer> {
        if self.lemmatize {
            Arc::new(ChatAnalyzer::new())
        } else {
            Arc::new(ChatAnalyzer::without_lemmatization())
        }
    }
}

/// Minimum similarity for a match, per classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_top_level")]
    pub top_level: f64,
    #[serde(default = "default_identity")]
    pub identity: f64,
    #[serde(default = "default_discoverability")]
    pub discoverability: f64,
    #[serde(default = "default_small_talk")]
    pub small_talk: f64,
    #[serde(default = "default_question_answering")]
    pub question_answering: f64,
}

fn default_top_level() -> f64 {
    0.2
}
fn default_identity() -> f64 {
    0.3
}
fn default_discoverability() -> f64 {
    0.3
}
fn default_small_talk() -> f64 {
    0.4
}
fn default_question_answering() -> f64 {
    0.65
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            top_level: default_top_level(),
            identity: default_identity(),
            discoverability: default_discoverability(),
            small_talk: default_small_talk(),
            question_answering: default_question_answering(),
        }
    }
}

impl Thresholds {
    /// Threshold used with the given corpus.
    pub fn get(&self, kind: CorpusKind) -> f64 {
        match kind {
            CorpusKind::Intents => self.top_level,
            CorpusKind::Identity => self.identity,
            CorpusKind::Discoverability => self.discoverability,
            CorpusKind::SmallTalk => self.small_talk,
            CorpusKind::QuestionAnswering => self.question_answering,
        }
    }
}

/// Optional corpus files. `None` selects the built-in corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusPaths {
    #[serde(default)]
    pub intents: Option<PathBuf>,
    #[serde(default)]
    pub identity: Option<PathBuf>,
    #[serde(default)]
    pub discoverability: Option<PathBuf>,
    #[serde(default)]
    pub small_talk: Option<PathBuf>,
    #[serde(default)]
    pub question_answering: Option<PathBuf>,
}

impl CorpusPaths {
    pub fn get(&self, kind: CorpusKind) -> Option<&Path> {
        match kind {
            CorpusKind::Intents => self.intents.as_deref(),
            CorpusKind::Identity => self.identity.as_deref(),
            CorpusKind::Discoverability => self.discoverability.as_deref(),
            CorpusKind::SmallTalk => self.small_talk.as_deref(),
            CorpusKind::QuestionAnswering => self.question_answering.as_deref(),
        }
    }
}
