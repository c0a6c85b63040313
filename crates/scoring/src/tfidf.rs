//! TF-IDF vectorization and cosine similarity.
//!
//! Weighting follows the common "smooth IDF" convention:
//!
//! - term frequency: raw count of the term in the document
//! - idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! - each row is L2-normalized
//!
//! Tokens are runs of two or more word characters, lowercased. The
//! vocabulary is whatever the fitted corpus contains; nothing is fixed
//! ahead of time.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Split a document into vectorizer tokens (lowercased, 2+ word chars).
pub fn tokenize(document: &str) -> Vec<String> {
    let lowered = document.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Sparse, L2-normalized row: `(term index, weight)` sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// A vector with no terms (e.g. an empty document)
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
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
}

/// Cosine similarity of two sparse vectors. Zero vectors score 0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(0.0, 1.0)
}

/// Result of fitting a corpus: one row per document, same order.
#[derive(Debug, Clone, Default)]
pub struct TfIdfMatrix {
    vocabulary: HashMap<String, usize>,
    rows: Vec<SparseVector>,
}

impl TfIdfMatrix {
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> Option<&SparseVector> {
        self.rows.get(idx)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

/// Fits TF-IDF weights over a corpus and transforms it in one step.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfVectorizer;

impl TfIdfVectorizer {
    pub fn new() -> Self {
        Self
    }

    /// Fit and transform raw documents.
    pub fn fit_transform(&self, documents: &[&str]) -> TfIdfMatrix {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();
        self.fit_transform_tokens(&tokenized)
    }

    /// Fit and transform documents that are already tokenized with
    /// [`tokenize`]. Lets callers cache tokenization of a fixed corpus.
    pub fn fit_transform_tokens<T: AsRef<[String]>>(&self, documents: &[T]) -> TfIdfMatrix {
        let n = documents.len() as f64;

        // Vocabulary in first-seen order, document frequency per term
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<u32> = Vec::new();
        let mut counts: Vec<HashMap<usize, u32>> = Vec::with_capacity(documents.len());

        for tokens in documents {
            let mut tf: HashMap<usize, u32> = HashMap::new();
            for token in tokens.as_ref() {
                let idx = match vocabulary.get(token) {
                    Some(&idx) => idx,
                    None => {
                        let idx = vocabulary.len();
                        vocabulary.insert(token.clone(), idx);
                        doc_freq.push(0);
                        idx
                    }
                };
                *tf.entry(idx).or_insert(0) += 1;
            }
            for &idx in tf.keys() {
                doc_freq[idx] += 1;
            }
            counts.push(tf);
        }

        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|tf| {
                let mut entries: Vec<(usize, f64)> = tf
                    .into_iter()
                    .map(|(idx, count)| (idx, count as f64 * idf[idx]))
                    .collect();
                entries.sort_unstable_by_key(|&(idx, _)| idx);

                let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in entries.iter_mut() {
                        *w /= norm;
                    }
                }
                SparseVector { entries }
            })
            .collect();

        TfIdfMatrix { vocabulary, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_matches_word_runs() {
        assert_eq!(
            tokenize("Learn SQL, a DB-tool: v2 x"),
            vec!["learn", "sql", "db", "tool", "v2"]
        );
    }

    #[test]
    fn test_idf_weights() {
        // "sql" appears in 2 of 3 docs, "cloud" in 1 of 3
        let matrix = TfIdfVectorizer::new().fit_transform(&["sql cloud", "sql", "excel"]);
        let row = matrix.row(0).unwrap();
        let sql = matrix.term_index("sql").unwrap();
        let cloud = matrix.term_index("cloud").unwrap();

        let idf_sql = (4.0f64 / 3.0).ln() + 1.0;
        let idf_cloud = (4.0f64 / 2.0).ln() + 1.0;
        let norm = (idf_sql * idf_sql + idf_cloud * idf_cloud).sqrt();

        let weight = |idx| row.entries().iter().find(|(i, _)| *i == idx).unwrap().1;
        assert!((weight(sql) - idf_sql / norm).abs() < 1e-12);
        assert!((weight(cloud) - idf_cloud / norm).abs() < 1e-12);
        assert!((row.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_bounds() {
        let matrix = TfIdfVectorizer::new().fit_transform(&[
            "learn sql and database management",
            "learn sql and database management",
            "public speaking",
            "",
        ]);
        let rows = matrix.rows();
        assert!((cosine_similarity(&rows[0], &rows[1]) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&rows[0], &rows[2]), 0.0);
        assert!(rows[3].is_zero());
        assert_eq!(cosine_similarity(&rows[0], &rows[3]), 0.0);
    }

    #[test]
    fn test_empty_corpus() {
        let matrix = TfIdfVectorizer::new().fit_transform(&["", "!"]);
        assert_eq!(matrix.vocabulary_size(), 0);
        assert!(matrix.rows().iter().all(SparseVector::is_zero));
    }
}
