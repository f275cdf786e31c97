//! Token filter implementations for token transformation.
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`alphanumeric::AlphanumericFilter`] - Drops tokens with non-alphanumeric characters
//! - [`stop::StopFilter`] - Removes stop words
//! - [`stem::StemFilter`] - Reduces words to their dictionary form
//!
//! Filters are chained inside an analyzer:
//!
//! ```text
//! Tokenizer → Lowercase → Alphanumeric → Lemmatize → Classifier
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// Filters receive a stream of tokens and produce a new stream, allowing them
/// to modify or drop tokens.
///
/// # Examples
///
/// ```
/// use maila::analysis::token::{Token, TokenStream};
/// use maila::analysis::token_filter::Filter;
/// use maila::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let reversed: Vec<Token> = tokens
///             .map(|t| {
///                 let text: String = t.text.chars().rev().collect();
///                 t.with_text(text)
///             })
///             .collect();
///         Ok(Box::new(reversed.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod alphanumeric;
pub mod lowercase;
pub mod stem;
pub mod stop;
