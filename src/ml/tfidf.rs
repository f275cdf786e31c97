//! TF-IDF vector space index.
//!
//! The index is fitted once on the normalized phrases of a corpus: a
//! vocabulary (term → column), a smoothed inverse document frequency per term
//! (`idf(t) = ln((1 + N) / (1 + df(t))) + 1`), and one L2-normalized row per
//! phrase weighted by raw term frequency × idf. Queries are vectorized under
//! the frozen vocabulary; unseen terms are dropped.

use std::collections::HashSet;

use ahash::AHashMap;

use crate::error::{MailaError, Result};

/// A sparse, L2-normalized term vector.
///
/// Entries are sorted by column index and never contain zero weights.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build a normalized vector from `(column, weight)` pairs.
    fn normalized(mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(_, weight)| weight > 0.0);
        entries.sort_by_key(|&(column, _)| column);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut entries {
                *weight /= norm;
            }
        }

        SparseVector { entries }
    }

    /// True when no vocabulary term contributed any weight.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Weight of a column (zero when absent).
    pub fn get(&self, column: usize) -> f64 {
        self.entries
            .binary_search_by_key(&column, |&(c, _)| c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Dot product of two sorted sparse vectors.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_col, a_w) = self.entries[i];
            let (b_col, b_w) = other.entries[j];
            match a_col.cmp(&b_col) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    /// Cosine similarity with another normalized vector, clamped to [0, 1].
    ///
    /// Zero vectors have similarity 0 with everything.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        if self.is_zero() || other.is_zero() {
            return 0.0;
        }
        self.dot(other).clamp(0.0, 1.0)
    }
}

/// TF-IDF vectorizer over pre-normalized token sequences.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    /// Vocabulary: term -> column index.
    vocabulary: AHashMap<String, usize>,
    /// Inverse document frequency for each column.
    idf: Vec<f64>,
    /// Total number of documents seen during fitting.
    n_documents: usize,
}

impl TfIdfVectorizer {
    /// Fit the vectorizer on documents.
    ///
    /// Columns are assigned in order of first appearance, so fitting is
    /// deterministic.
    pub fn fit(documents: &[Vec<String>]) -> Self {
        let mut vocabulary = AHashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in documents {
            let mut seen = HashSet::new();
            for token in doc {
                if !seen.insert(token.as_str()) {
                    continue;
                }
                let next = vocabulary.len();
                let column = *vocabulary.entry(token.clone()).or_insert(next);
                if column == document_frequency.len() {
                    document_frequency.push(0);
                }
                document_frequency[column] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0)
            .collect();

        TfIdfVectorizer {
            vocabulary,
            idf,
            n_documents: documents.len(),
        }
    }

    /// Transform a token sequence into a normalized TF-IDF vector.
    pub fn transform(&self, tokens: &[String]) -> SparseVector {
        let mut tf: AHashMap<usize, f64> = AHashMap::new();
        for token in tokens {
            if let Some(&column) = self.vocabulary.get(token) {
                *tf.entry(column).or_insert(0.0) += 1.0;
            }
        }

        SparseVector::normalized(
            tf.into_iter()
                .map(|(column, count)| (column, count * self.idf[column]))
                .collect(),
        )
    }

    /// Column of a term, if it is in the vocabulary.
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Inverse document frequency of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.column(term).map(|column| self.idf[column])
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }
}

/// Best-matching corpus row for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowMatch {
    /// Row index in corpus order.
    pub row: usize,
    /// Cosine similarity in [0, 1].
    pub score: f64,
}

/// A fitted vectorizer plus the weighted document matrix of its corpus.
#[derive(Debug, Clone)]
pub struct VectorSpaceIndex {
    vectorizer: TfIdfVectorizer,
    rows: Vec<SparseVector>,
}

impl VectorSpaceIndex {
    /// Build the index from normalized documents.
    ///
    /// Fails when there are no documents or none of them has any term.
    pub fn build(documents: &[Vec<String>]) -> Result<Self> {
        if documents.is_empty() {
            return Err(MailaError::index("cannot build an index from zero documents"));
        }

        let vectorizer = TfIdfVectorizer::fit(documents);
        if vectorizer.vocabulary_size() == 0 {
            return Err(MailaError::index("corpus has no indexable terms"));
        }

        let rows = documents
            .iter()
            .map(|doc| vectorizer.transform(doc))
            .collect();

        Ok(VectorSpaceIndex { vectorizer, rows })
    }

    /// Vectorize a query under the frozen vocabulary.
    pub fn vectorize(&self, tokens: &[String]) -> SparseVector {
        self.vectorizer.transform(tokens)
    }

    /// Similarity of the query against every row, in row order.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        self.rows.iter().map(|row| query.cosine(row)).collect()
    }

    /// The row with the highest similarity; the lowest index wins ties.
    ///
    /// Returns `None` for a zero query vector, which has no meaningful match.
    pub fn best_match(&self, query: &SparseVector) -> Option<RowMatch> {
        if query.is_zero() {
            return None;
        }

        let mut best = RowMatch { row: 0, score: 0.0 };
        for (row, vector) in self.rows.iter().enumerate() {
            let score = query.cosine(vector);
            if score > best.score {
                best = RowMatch { row, score };
            }
        }

        Some(best)
    }

    /// Number of indexed rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the index has no rows (never the case after `build`).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The fitted vectorizer.
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(phrases: &[&str]) -> Vec<Vec<String>> {
        phrases
            .iter()
            .map(|p| p.split_whitespace().map(str::to_string).collect())
            .collect()
    }

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_idf_smoothing() {
        let vectorizer = TfIdfVectorizer::fit(&docs(&["hello world", "hello there"]));

        assert_eq!(vectorizer.vocabulary_size(), 3);
        assert_eq!(vectorizer.n_documents(), 2);
        // df(hello) = 2 → ln(3/3) + 1
        assert!((vectorizer.idf("hello").unwrap() - 1.0).abs() < 1e-12);
        // df(world) = 1 → ln(3/2) + 1
        assert!((vectorizer.idf("world").unwrap() - (1.5f64.ln() + 1.0)).abs() < 1e-12);
        assert_eq!(vectorizer.idf("missing"), None);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let index = VectorSpaceIndex::build(&docs(&["a b b c", "c d"])).unwrap();
        let query = index.vectorize(&tokens("a b b c"));

        assert!((query.dot(&query) - 1.0).abs() < 1e-9);
        assert!(query.get(index.vectorizer().column("b").unwrap()) > query.get(0));
    }

    #[test]
    fn test_unseen_terms_are_dropped() {
        let index = VectorSpaceIndex::build(&docs(&["hello world"])).unwrap();

        let query = index.vectorize(&tokens("goodbye moon"));
        assert!(query.is_zero());
        assert_eq!(index.best_match(&query), None);
        assert_eq!(index.vectorizer().vocabulary_size(), 2);
    }

    #[test]
    fn test_exact_phrase_scores_one() {
        let index = VectorSpaceIndex::build(&docs(&["what is my name", "tell me a joke"])).unwrap();
        let query = index.vectorize(&tokens("tell me a joke"));

        let best = index.best_match(&query).unwrap();
        assert_eq!(best.row, 1);
        assert!((best.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_pick_lowest_row() {
        let index = VectorSpaceIndex::build(&docs(&["good morning", "good morning", "good night"]))
            .unwrap();
        let query = index.vectorize(&tokens("good morning"));

        let similarities = index.similarities(&query);
        assert_eq!(similarities[0], similarities[1]);
        assert_eq!(index.best_match(&query).unwrap().row, 0);
    }

    #[test]
    fn test_build_failures() {
        assert!(VectorSpaceIndex::build(&[]).is_err());
        assert!(VectorSpaceIndex::build(&[vec![], vec![]]).is_err());
    }

    #[test]
    fn test_sparse_dot_product() {
        let a = SparseVector::normalized(vec![(0, 1.0), (2, 1.0)]);
        let b = SparseVector::normalized(vec![(2, 1.0), (5, 1.0)]);

        assert!((a.dot(&b) - 0.5).abs() < 1e-12);
        assert_eq!(a.cosine(&SparseVector::default()), 0.0);
        assert_eq!(a.nnz(), 2);
    }
}
