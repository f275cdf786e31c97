//! Alphanumeric filter implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Which characters a token may contain to survive the filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CharClass {
    /// Letters and digits.
    #[default]
    Alphanumeric,
    /// Letters only.
    Alphabetic,
}

impl CharClass {
    fn accepts(&self, text: &str) -> bool {
        !text.is_empty()
            && match self {
                CharClass::Alphanumeric => text.chars().all(char::is_alphanumeric),
                CharClass::Alphabetic => text.chars().all(char::is_alphabetic),
            }
    }
}

/// A filter that removes tokens containing characters outside a [`CharClass`].
///
/// Contractions like "don't" and tokens such as "3rd-party" are removed
/// entirely rather than split.
///
/// # Examples
///
/// ```
/// use maila::analysis::token_filter::Filter;
/// use maila::analysis::token_filter::alphanumeric::AlphanumericFilter;
/// use maila::analysis::token::Token;
///
/// let filter = AlphanumericFilter::new();
/// let tokens = vec![Token::new("hello", 0), Token::new("don't", 1), Token::new("42", 2)];
/// let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
///
/// assert_eq!(result.len(), 2);
/// assert_eq!(result[1].text, "42");
/// ```
#[derive(Clone, Debug, Default)]
pub struct AlphanumericFilter {
    class: CharClass,
}

impl AlphanumericFilter {
    /// Create a filter keeping letters and digits.
    pub fn new() -> Self {
        AlphanumericFilter {
            class: CharClass::Alphanumeric,
        }
    }

    /// Create a filter keeping purely alphabetic tokens.
    pub fn alphabetic() -> Self {
        AlphanumericFilter {
            class: CharClass::Alphabetic,
        }
    }

    /// Check whether a word survives this filter.
    pub fn accepts(&self, word: &str) -> bool {
        self.class.accepts(word)
    }
}

impl Filter for AlphanumericFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| token.is_stopped() || self.accepts(&token.text))
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        match self.class {
            CharClass::Alphanumeric => "alphanumeric",
            CharClass::Alphabetic => "alphabetic",
        }
    }
}
