//! Keyword rules for sub-state menus.
//!
//! Inside a menu the next reply is routed by keywords rather than by a
//! classifier. Keywords match whole lower-cased words, and a multi-word
//! keyword matches a contiguous run of words, so "no" does not fire on
//! "know" and "where am i" does not fire on "where i am".

use std::sync::LazyLock;

use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::regex::RegexTokenizer;

/// Affirmative replies.
pub const AFFIRMATIVE: &[&str] = &["yes", "yeah", "yep", "ok", "okay", "alright", "sure", "affirmative"];

/// Negative replies.
pub const NEGATIVE: &[&str] = &["no", "nope", "nevermind", "never mind"];

static WORD_TOKENIZER: LazyLock<RegexTokenizer> = LazyLock::new(RegexTokenizer::default);

/// Lower-cased words of an utterance.
pub fn words(utterance: &str) -> Vec<String> {
    match WORD_TOKENIZER.tokenize(&utterance.to_lowercase()) {
        Ok(tokens) => tokens.map(|token| token.text).collect(),
        Err(_) => Vec::new(),
    }
}

fn contains_phrase(words: &[String], keyword: &str) -> bool {
    let target: Vec<&str> = keyword.split_whitespace().collect();
    if target.is_empty() || target.len() > words.len() {
        return false;
    }
    words
        .windows(target.len())
        .any(|window| window.iter().zip(&target).all(|(word, kw)| word == kw))
}

/// True when any keyword occurs in the utterance as a whole word or word run.
pub fn matches_any(utterance: &str, keywords: &[&str]) -> bool {
    let words = words(utterance);
    keywords.iter().any(|keyword| contains_phrase(&words, keyword))
}

/// One row of a menu's transition table.
#[derive(Debug, Clone, Copy)]
pub struct Rule<A> {
    /// Keywords that trigger the rule.
    pub keywords: &'static [&'static str],
    /// What happens when it fires.
    pub action: A,
}

impl<A> Rule<A> {
    /// Create a rule.
    pub const fn new(keywords: &'static [&'static str], action: A) -> Self {
        Rule { keywords, action }
    }
}

/// The action of the first rule whose keywords match, in table order.
pub fn first_match<'a, A>(rules: &'a [Rule<A>], utterance: &str) -> Option<&'a A> {
    let words = words(utterance);
    rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| contains_phrase(&words, kw)))
        .map(|rule| &rule.action)
}
