//! # Scoring Crate
//!
//! Turns a free-text message into per-course similarity scores.
//!
//! ## Components
//!
//! ### Normalizer
//! [`TextNormalizer`] trait plus the default [`StopWordNormalizer`]:
//! lowercase, alphabetic-only tokens, English stop words removed.
//!
//! ### TF-IDF
//! [`TfIdfVectorizer`] fits a vocabulary and smoothed IDF weights over a
//! corpus and produces L2-normalized sparse rows; [`cosine_similarity`]
//! compares two rows.
//!
//! ### Similarity
//! [`SimilarityScorer`] scores the whole catalog against one normalized
//! message, refitting TF-IDF on `descriptions + message` per call.
//!
//! ## Example Usage
//!
//! ```ignore
//! use scoring::{normalize_to_string, SimilarityScorer, StopWordNormalizer};
//!
//! let normalizer = StopWordNormalizer::new();
//! let scorer = SimilarityScorer::new(catalog.clone());
//!
//! let normalized = normalize_to_string(&normalizer, "I need help with SQL databases");
//! let scores = scorer.score(&normalized);
//! ```

// Public modules
pub mod types;
pub mod stop_words;
pub mod normalizer;
pub mod tfidf;
pub mod similarity;

// Re-export commonly used types
pub use types::{rank_by_score, ScoredCourse};
pub use normalizer::{normalize_to_string, StopWordNormalizer, TextNormalizer};
pub use tfidf::{cosine_similarity, SparseVector, TfIdfMatrix, TfIdfVectorizer};
pub use similarity::SimilarityScorer;
