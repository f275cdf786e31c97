//! Labeled phrase corpora.
//!
//! A corpus is an ordered list of `(phrase, label)` rows. Intent corpora map
//! example phrases to intent labels; the small-talk and question-answering
//! corpora map questions to canned answers, using the answer itself as the label.
//!
//! Corpora are stored as JSON arrays. Rows use the keys `phrase` and `label`;
//! `query`/`intent` and `question`/`answer` are accepted as aliases.
//!
//! ```
//! use maila::ml::corpus::LabeledCorpus;
//!
//! let corpus = LabeledCorpus::from_json_str(
//!     r#"[{"question": "how are you", "answer": "I'm well, thanks!"}]"#,
//! ).unwrap();
//! assert_eq!(corpus.rows()[0].label, "I'm well, thanks!");
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MailaError, Result};

const INTENTS_JSON: &str = include_str!("../../data/intents.json");
const IDENTITY_JSON: &str = include_str!("../../data/identity.json");
const DISCOVERABILITY_JSON: &str = include_str!("../../data/discoverability.json");
const SMALL_TALK_JSON: &str = include_str!("../../data/small_talk.json");
const QUESTION_ANSWERING_JSON: &str = include_str!("../../data/question_answering.json");

/// One corpus row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPhrase {
    /// Example phrase (raw, not yet normalized).
    #[serde(alias = "query", alias = "question")]
    pub phrase: String,
    /// Intent label, or canned answer for question/answer corpora.
    #[serde(alias = "intent", alias = "answer")]
    pub label: String,
}

impl LabeledPhrase {
    /// Create a new row.
    pub fn new<P: Into<String>, L: Into<String>>(phrase: P, label: L) -> Self {
        LabeledPhrase {
            phrase: phrase.into(),
            label: label.into(),
        }
    }
}

/// The corpora bundled with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusKind {
    /// Top-level routing intents.
    Intents,
    /// Identity sub-intents.
    Identity,
    /// Discoverability (help) sub-intents.
    Discoverability,
    /// Small-talk question/answer pairs.
    SmallTalk,
    /// Factual question/answer pairs.
    QuestionAnswering,
}

impl CorpusKind {
    /// All bundled corpora.
    pub const ALL: [CorpusKind; 5] = [
        CorpusKind::Intents,
        CorpusKind::Identity,
        CorpusKind::Discoverability,
        CorpusKind::SmallTalk,
        CorpusKind::QuestionAnswering,
    ];

    fn builtin_json(&self) -> &'static str {
        match self {
            CorpusKind::Intents => INTENTS_JSON,
            CorpusKind::Identity => IDENTITY_JSON,
            CorpusKind::Discoverability => DISCOVERABILITY_JSON,
            CorpusKind::SmallTalk => SMALL_TALK_JSON,
            CorpusKind::QuestionAnswering => QUESTION_ANSWERING_JSON,
        }
    }

    /// Short name used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            CorpusKind::Intents => "intents",
            CorpusKind::Identity => "identity",
            CorpusKind::Discoverability => "discoverability",
            CorpusKind::SmallTalk => "small_talk",
            CorpusKind::QuestionAnswering => "question_answering",
        }
    }
}

impl fmt::Display for CorpusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered, non-empty, immutable list of labeled phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledCorpus {
    rows: Vec<LabeledPhrase>,
}

impl LabeledCorpus {
    /// Create a corpus from rows.
    ///
    /// Rows with a blank phrase or label are skipped. Fails if nothing is left.
    pub fn new(rows: Vec<LabeledPhrase>) -> Result<Self> {
        let total = rows.len();
        let rows: Vec<LabeledPhrase> = rows
            .into_iter()
            .filter(|row| !row.phrase.trim().is_empty() && !row.label.trim().is_empty())
            .collect();

        if rows.len() < total {
            log::warn!("Skipped {} blank corpus rows", total - rows.len());
        }
        if rows.is_empty() {
            return Err(MailaError::corpus("corpus contains no usable rows"));
        }

        Ok(LabeledCorpus { rows })
    }

    /// Create a corpus from `(phrase, label)` pairs.
    pub fn from_pairs<I, P, L>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(phrase, label)| LabeledPhrase::new(phrase, label))
                .collect(),
        )
    }

    /// Parse a corpus from a JSON array.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rows: Vec<LabeledPhrase> = serde_json::from_str(json)?;
        Self::new(rows)
    }

    /// Load a corpus from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            MailaError::corpus(format!("cannot read corpus {}: {e}", path.display()))
        })?;
        Self::from_json_str(&content)
    }

    /// Load one of the corpora bundled with the crate.
    pub fn builtin(kind: CorpusKind) -> Result<Self> {
        Self::from_json_str(kind.builtin_json())
    }

    /// Load the corpus from `path` when given, otherwise the bundled one.
    pub fn load(kind: CorpusKind, path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(kind),
        }
    }

    /// All rows in corpus order.
    pub fn rows(&self) -> &[LabeledPhrase] {
        &self.rows
    }

    /// Label of the row at `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(|row| row.label.as_str())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: a corpus cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_pairs_skips_blank_rows() {
        let corpus = LabeledCorpus::from_pairs(vec![
            ("hello there", "SmallTalk"),
            ("   ", "SmallTalk"),
            ("what is my name", ""),
        ])
        .unwrap();

        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.label(0), Some("SmallTalk"));
        assert_eq!(corpus.label(1), None);
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let err = LabeledCorpus::from_json_str("[]").unwrap_err();
        assert!(matches!(err, MailaError::Corpus(_)));
    }

    #[test]
    fn test_aliases() {
        let corpus = LabeledCorpus::from_json_str(
            r#"[
                {"query": "forget my name", "intent": "NameDelete"},
                {"phrase": "call me alex", "label": "NameDirect"}
            ]"#,
        )
        .unwrap();

        assert_eq!(corpus.rows()[0], LabeledPhrase::new("forget my name", "NameDelete"));
        assert_eq!(corpus.rows()[1].label, "NameDirect");
    }

    #[test]
    fn test_malformed_json() {
        let err = LabeledCorpus::from_json_str(r#"[{"phrase": "missing label"}]"#).unwrap_err();
        assert!(matches!(err, MailaError::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"phrase": "help me", "label": "HelpGeneral"}}]"#).unwrap();

        let corpus = LabeledCorpus::from_file(file.path()).unwrap();
        assert_eq!(corpus.len(), 1);

        let missing = LabeledCorpus::from_file("/definitely/not/here.json");
        assert!(matches!(missing, Err(MailaError::Corpus(_))));
    }

    #[test]
    fn test_builtin_corpora_load() {
        for kind in CorpusKind::ALL {
            let corpus = LabeledCorpus::builtin(kind).unwrap();
            assert!(corpus.len() > 5, "{kind} corpus is too small");
        }
    }
}
