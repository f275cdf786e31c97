//! Command implementations for the Maila CLI.

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ChatConfig;
use crate::dialogue::DialogueManager;
use crate::error::Result;
use crate::ml::corpus::CorpusKind;
use crate::ml::intent_classifier::IntentClassifier;

const BANNER: &str =
    "[SYSTEM]: Type 'STOP' or 'QUIT' to quit, type 'CANCEL' to cancel an active action/dialogue";

/// Execute a CLI command.
pub fn execute_command(args: MailaArgs) -> Result<()> {
    match &args.command {
        Command::Chat(chat_args) => chat(chat_args.clone(), &args),
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
    }
}

fn load_config(path: Option<&Path>) -> Result<ChatConfig> {
    match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            ChatConfig::from_file(path)
        }
        None => Ok(ChatConfig::default()),
    }
}

/// Run the interactive conversation on stdin/stdout.
fn chat(args: ChatArgs, cli_args: &MailaArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut manager = DialogueManager::from_config(&config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_chat(
        &mut manager,
        &config.bot_name,
        stdin.lock(),
        &mut stdout.lock(),
        cli_args,
    )
}

/// True for the words that end the conversation.
pub fn is_exit_command(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("stop") || line.eq_ignore_ascii_case("quit")
}

/// The conversation loop, one reply per input line.
///
/// Ends on `STOP`, `QUIT` or end of input.
pub fn run_chat<R: BufRead, W: Write>(
    manager: &mut DialogueManager,
    bot_name: &str,
    input: R,
    out: &mut W,
    cli_args: &MailaArgs,
) -> Result<()> {
    let human = cli_args.output_format == OutputFormat::Human;
    if human {
        writeln!(out, "{BANNER}")?;
        writeln!(
            out,
            "{}",
            format_bot_line(bot_name, &format!("Hello, I'm {bot_name}! How can I help you today?"))
        )?;
    }

    let mut lines = input.lines();
    loop {
        if human {
            let label = manager
                .session()
                .username()
                .map(str::to_uppercase)
                .unwrap_or_else(|| "USER".to_string());
            write!(out, "[{label}]: ")?;
            out.flush()?;
        }

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                if human {
                    writeln!(out)?;
                }
                break;
            }
        };

        if is_exit_command(&line) {
            if human {
                writeln!(out, "{}", format_bot_line(bot_name, "Goodbye!"))?;
            }
            break;
        }

        let reply = manager.respond(&line);
        output_reply(out, bot_name, &reply, cli_args)?;
    }

    log::info!("Conversation ended");
    Ok(())
}

/// Classify one utterance and print the result.
fn classify(args: ClassifyArgs, cli_args: &MailaArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let kind = CorpusKind::from(args.corpus);
    let threshold = args.threshold.unwrap_or_else(|| config.thresholds.get(kind));
    if !(0.0..=1.0).contains(&threshold) {
        return Err(anyhow::anyhow!("threshold must be within [0, 1], got {threshold}").into());
    }

    let classifier = IntentClassifier::from_corpus(kind.as_str(), config.load_corpus(kind), config.analyzer());
    let report = ClassificationReport {
        utterance: args.utterance.clone(),
        corpus: kind,
        threshold,
        result: classifier.classify(&args.utterance, threshold),
    };

    output_result(&mut io::stdout().lock(), "Classification", &report, cli_args)
}
