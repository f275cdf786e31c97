//! Output formatting for CLI commands.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::cli::args::{MailaArgs, OutputFormat};
use crate::dialogue::Reply;
use crate::error::Result;
use crate::ml::corpus::CorpusKind;
use crate::ml::intent_classifier::Classification;

/// Result structure for one-shot classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub utterance: String,
    pub corpus: CorpusKind,
    pub threshold: f64,
    pub result: Classification,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize, W: Write>(
    out: &mut W,
    message: &str,
    result: &T,
    args: &MailaArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(out, message, result, args),
        OutputFormat::Json => output_json(out, result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize, W: Write>(
    out: &mut W,
    message: &str,
    result: &T,
    args: &MailaArgs,
) -> Result<()> {
    if args.verbosity() > 1 {
        writeln!(out, "{message}")?;
        writeln!(out)?;
    }

    let value = serde_json::to_value(result)?;
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                writeln!(out, "{key}: {}", format_value(&val))?;
            }
        }
        _ => writeln!(out, "{}", format_value(&value))?,
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize, W: Write>(out: &mut W, result: &T, args: &MailaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    writeln!(out, "{json}")?;
    Ok(())
}

/// Write one chat reply.
///
/// In human mode the reply is tagged with the bot's name unless it already
/// carries a `[SYSTEM ERROR]` tag; in JSON mode the whole [`Reply`] is written.
pub fn output_reply<W: Write>(
    out: &mut W,
    bot_name: &str,
    reply: &Reply,
    args: &MailaArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            writeln!(out, "{}", format_bot_line(bot_name, &reply.text))?;
            Ok(())
        }
        OutputFormat::Json => output_json(out, reply, args),
    }
}

/// Prefix a line with `[NAME]: ` unless it is a system error.
pub fn format_bot_line(bot_name: &str, text: &str) -> String {
    if text.starts_with("[SYSTEM ERROR]") {
        text.to_string()
    } else {
        format!("[{}]: {text}", bot_name.to_uppercase())
    }
}

/// Format a JSON value for human-readable output.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(f) if !n.is_i64() && !n.is_u64() => format!("{f:.3}"),
            _ => n.to_string(),
        },
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Object(obj) => obj
            .iter()
            .map(|(k, v)| format!("{k}={}", format_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
        serde_json::Value::Array(arr) => arr
            .iter()
            .map(format_value)
            .collect::<Vec<_>>()
            .join(", "),
    }
}
