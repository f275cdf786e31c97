//! Text analysis module for Maila.
//!
//! This module turns raw utterances into the canonical token sequences used by
//! the classifiers: tokenization, lowercasing, dropping non-alphanumeric
//! tokens, and lemmatization. Each step is a small pluggable component so the
//! environment can swap in its own normalizer through [`analyzer::FnAnalyzer`].

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
