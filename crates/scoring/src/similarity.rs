//! Catalog similarity scoring.
//!
//! For every call the corpus is `catalog descriptions + normalized input`
//! (input last). The TF-IDF vocabulary and IDF weights are refitted on
//! that corpus each time, so scores for a given input depend on the whole
//! catalog. Only the tokenization of the descriptions is cached.

use crate::tfidf::{cosine_similarity, tokenize, TfIdfVectorizer};
use crate::types::ScoredCourse;
use catalog_loader::CourseCatalog;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Scores catalog courses against a normalized message.
#[derive(Debug, Clone)]
pub struct SimilarityScorer {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    catalog: Arc<CourseCatalog>,

    /// Description tokens in catalog order
    description_tokens: Arc<Vec<Vec<String>>>,

    vectorizer: TfIdfVectorizer,
}

impl SimilarityScorer {
    /// Create a scorer, tokenizing every catalog description once.
    pub fn new(catalog: Arc<CourseCatalog>) -> Self {
        let description_tokens = catalog
            .descriptions()
            .par_iter()
            .map(|description| tokenize(description))
            .collect();

        Self {
            catalog,
            description_tokens: Arc::new(description_tokens),
            vectorizer: TfIdfVectorizer::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<CourseCatalog> {
        &self.catalog
    }

    /// Score every course against `normalized_text`.
    ///
    /// Returns one entry per course, in catalog order. When the input has
    /// no usable tokens every score is 0.
    #[instrument(skip(self, normalized_text), fields(courses = self.catalog.len()))]
    pub fn score(&self, normalized_text: &str) -> Vec<ScoredCourse> {
        let input_tokens = tokenize(normalized_text);
        if input_tokens.is_empty() {
            warn!("Normalized input has no tokens; skipping similarity scoring");
            return self.zero_scores();
        }

        let mut corpus: Vec<&[String]> = self
            .description_tokens
            .iter()
            .map(|tokens| tokens.as_slice())
            .collect();
        corpus.push(input_tokens.as_slice());

        let matrix = self.vectorizer.fit_transform_tokens(&corpus);
        let Some((input_row, description_rows)) = matrix.rows().split_last() else {
            return self.zero_scores();
        };

        let scores: Vec<ScoredCourse> = description_rows
            .par_iter()
            .enumerate()
            .map(|(course_id, row)| ScoredCourse::new(course_id, cosine_similarity(input_row, row)))
            .collect();

        debug!(
            "Scored {} courses over a vocabulary of {} terms",
            scores.len(),
            matrix.vocabulary_size()
        );
        scores
    }

    fn zero_scores(&self) -> Vec<ScoredCourse> {
        (0..self.catalog.len())
            .map(|course_id| ScoredCourse::new(course_id, 0.0))
            .collect()
    }
}
