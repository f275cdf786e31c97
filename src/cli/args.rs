//! Command line argument parsing for the Maila CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::ml::corpus::CorpusKind;

/// Maila - a small conversational agent
#[derive(Parser, Debug, Clone)]
#[command(name = "maila")]
#[command(about = "A turn-based chatbot with TF-IDF intent routing")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct MailaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl MailaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start an interactive conversation
    Chat(ChatArgs),

    /// Classify a single utterance against one corpus
    Classify(ClassifyArgs),
}

/// Arguments for the interactive chat
#[derive(Parser, Debug, Clone)]
pub struct ChatArgs {
    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "MAILA_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Arguments for one-shot classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Utterance to classify
    #[arg(value_name = "UTTERANCE")]
    pub utterance: String,

    /// Corpus to classify against
    #[arg(long, default_value = "intents")]
    pub corpus: CorpusArg,

    /// Minimum similarity for a match (defaults to the configured threshold)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "MAILA_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Corpora selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorpusArg {
    /// Top-level routing intents
    Intents,
    /// Identity sub-intents
    Identity,
    /// Help sub-intents
    Discoverability,
    /// Small-talk questions
    SmallTalk,
    /// Factual questions
    QuestionAnswering,
}

impl From<CorpusArg> for CorpusKind {
    fn from(arg: CorpusArg) -> Self {
        match arg {
            CorpusArg::Intents => CorpusKind::Intents,
            CorpusArg::Identity => CorpusKind::Identity,
            CorpusArg::Discoverability => CorpusKind::Discoverability,
            CorpusArg::SmallTalk => CorpusKind::SmallTalk,
            CorpusArg::QuestionAnswering => CorpusKind::QuestionAnswering,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
