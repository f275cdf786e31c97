//! Analyzer implementations that combine tokenizers and filters.
//!
//! An [`Analyzer`] is the text normalizer the classifiers depend on: raw text
//! in, canonical token sequence out. [`ChatAnalyzer`] is the default used for
//! conversational input; [`FnAnalyzer`] lets the surrounding application
//! inject any deterministic `Fn(&str) -> Vec<String>` instead.

use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::alphanumeric::AlphanumericFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::StemFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze the text and keep the surviving token texts in order.
    fn normalize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .analyze(text)?
            .filter(|token| !token.is_stopped() && !token.is_empty())
            .map(|token| token.text)
            .collect())
    }
}

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = self.tokenizer.tokenize(text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// The default normalizer for conversational input.
///
/// Unicode word tokenization, lowercasing, removal of tokens that are not
/// purely alphanumeric, and plural-noun lemmatization.
///
/// # Examples
///
/// ```
/// use maila::analysis::analyzer::{Analyzer, ChatAnalyzer};
///
/// let analyzer = ChatAnalyzer::new();
/// let tokens = analyzer.normalize("What are your Capabilities?").unwrap();
/// assert_eq!(tokens, vec!["what", "are", "your", "capability"]);
/// ```
#[derive(Debug, Clone)]
pub struct ChatAnalyzer {
    inner: PipelineAnalyzer,
}

impl ChatAnalyzer {
    /// Create a new chat analyzer with lemmatization enabled.
    pub fn new() -> Self {
        let analyzer = Self::base_pipeline()
            .add_filter(Arc::new(StemFilter::new()))
            .with_name("chat");

        ChatAnalyzer { inner: analyzer }
    }

    /// Create a chat analyzer that keeps word forms as written.
    pub fn without_lemmatization() -> Self {
        let analyzer = Self::base_pipeline().with_name("chat_no_lemma");

        ChatAnalyzer { inner: analyzer }
    }

    fn base_pipeline() -> PipelineAnalyzer {
        PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(AlphanumericFilter::new()))
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Default for ChatAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for ChatAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "chat"
    }
}

/// An analyzer backed by a plain normalization function.
///
/// The function must be deterministic and side-effect free; the classifiers
/// call it once per corpus phrase at construction and once per utterance.
///
/// # Examples
///
/// ```
/// use maila::analysis::analyzer::{Analyzer, FnAnalyzer};
///
/// let analyzer = FnAnalyzer::new(|text: &str| {
///     text.split_whitespace().map(|w| w.to_uppercase()).collect()
/// });
/// assert_eq!(analyzer.normalize("hi there").unwrap(), vec!["HI", "THERE"]);
/// ```
pub struct FnAnalyzer<F> {
    normalize: F,
}

impl<F> FnAnalyzer<F>
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    /// Wrap a normalization function.
    pub fn new(normalize: F) -> Self {
        FnAnalyzer { normalize }
    }
}

impl<F> Analyzer for FnAnalyzer<F>
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = (self.normalize)(text)
            .into_iter()
            .enumerate()
            .map(|(position, word)| Token::new(word, position))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "fn"
    }
}

impl<F> std::fmt::Debug for FnAnalyzer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnAnalyzer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_filter::stop::StopFilter;
    use crate::analysis::tokenizer::regex::RegexTokenizer;

    #[test]
    fn test_pipeline_analyzer() {
        let tokenizer = Arc::new(RegexTokenizer::new().unwrap());
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::from_words(vec!["the", "and"])));

        let tokens: Vec<Token> = analyzer
            .analyze("Hello THE world AND test")
            .unwrap()
            .collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, "test");
    }

    #[test]
    fn test_normalize_skips_stopped_tokens() {
        let tokenizer = Arc::new(RegexTokenizer::new().unwrap());
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_filter(Arc::new(StopFilter::from_words(vec!["the"]).remove_stopped(false)));

        assert_eq!(analyzer.normalize("the cat").unwrap(), vec!["cat"]);
    }

    #[test]
    fn test_chat_analyzer() {
        let analyzer = ChatAnalyzer::new();

        assert_eq!(
            analyzer.normalize("Please, forget my NAMES!").unwrap(),
            vec!["please", "forget", "my", "name"]
        );
        assert_eq!(analyzer.normalize("Don't ask 2 questions").unwrap(), vec!["ask", "2", "question"]);
    }

    #[test]
    fn test_chat_analyzer_blank_input() {
        let analyzer = ChatAnalyzer::new();

        assert!(analyzer.normalize("").unwrap().is_empty());
        assert!(analyzer.normalize("   ?!  ").unwrap().is_empty());
    }

    #[test]
    fn test_chat_analyzer_without_lemmatization() {
        let analyzer = ChatAnalyzer::without_lemmatization();
        assert_eq!(analyzer.normalize("Emails").unwrap(), vec!["emails"]);
    }

    #[test]
    fn test_fn_analyzer() {
        let analyzer = FnAnalyzer::new(|text: &str| {
            text.split(',').map(|s| s.trim().to_string()).collect()
        });

        let tokens: Vec<Token> = analyzer.analyze("a, b").unwrap().collect();
        assert_eq!(tokens[1].text, "b");
        assert_eq!(tokens[1].position, 1);
        assert_eq!(analyzer.name(), "fn");
    }

    #[test]
    fn test_analyzer_names() {
        let tokenizer = Arc::new(RegexTokenizer::new().unwrap());
        let pipeline = PipelineAnalyzer::new(tokenizer);

        assert_eq!(pipeline.name(), "pipeline");
        assert_eq!(ChatAnalyzer::new().name(), "chat");
        assert_eq!(
            format!("{:?}", pipeline),
            "PipelineAnalyzer { name: \"pipeline_regex\", tokenizer: \"regex\", filters: [] }"
        );
    }
}
