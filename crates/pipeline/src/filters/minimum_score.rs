//! Filter to enforce a minimum similarity score.
//!
//! Weak matches are noise for short messages, so only courses scoring
//! strictly above the threshold survive.

use crate::traits::Filter;
use anyhow::{ensure, Result};
use scoring::ScoredCourse;

/// Removes courses whose score is not strictly greater than `threshold`.
pub struct MinimumScoreFilter {
    threshold: f64,
}

impl MinimumScoreFilter {
    /// Create a new MinimumScoreFilter (typically 0.1).
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Filter for MinimumScoreFilter {
    fn name(&self) -> &str {
        "MinimumScoreFilter"
    }

    fn apply(&self, scored: Vec<ScoredCourse>) -> Result<Vec<ScoredCourse>> {
        ensure!(
            !self.threshold.is_nan(),
            "similarity threshold must be a number"
        );
        Ok(scored
            .into_iter()
            .filter(|course| course.score > self.threshold)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        let scored = vec![
            ScoredCourse::new(0, 0.5),
            ScoredCourse::new(1, 0.1),
            ScoredCourse::new(2, 0.1000001),
            ScoredCourse::new(3, 0.0),
        ];

        let filter = MinimumScoreFilter::new(0.1);
        let kept = filter.apply(scored).unwrap();

        let ids: Vec<_> = kept.iter().map(|s| s.course_id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_nan_threshold_is_an_error() {
        let filter = MinimumScoreFilter::new(f64::NAN);
        assert!(filter.apply(vec![ScoredCourse::new(0, 0.5)]).is_err());
    }
}
