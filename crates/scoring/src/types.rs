//! Shared types for similarity scoring.

use catalog_loader::CourseId;
use serde::{Deserialize, Serialize};

/// One catalog course with its similarity to the input text.
///
/// Scores are cosine similarities of non-negative TF-IDF vectors,
/// so they always fall in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredCourse {
    pub course_id: CourseId,
    pub score: f64,
}

impl ScoredCourse {
    pub fn new(course_id: CourseId, score: f64) -> Self {
        Self { course_id, score }
    }
}

/// Sort by descending score. The sort is stable, so equal scores keep
/// catalog order.
pub fn rank_by_score(scored: &mut [ScoredCourse]) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
