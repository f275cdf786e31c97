//! Similarity-based intent classification.
//!
//! - [`corpus`] - labeled phrase corpora and their loaders
//! - [`tfidf`] - the TF-IDF vector space index built from a corpus
//! - [`intent_classifier`] - nearest-phrase classification with thresholds
//!
//! Indices are built once when a classifier is constructed and are read-only
//! afterwards, so a classifier can be shared behind an `Arc` by any number of
//! conversations.

pub mod corpus;
pub mod intent_classifier;
pub mod tfidf;
