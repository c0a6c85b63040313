//! Filter to cap the number of similarity matches.

use crate::traits::Filter;
use anyhow::Result;
use scoring::ScoredCourse;

/// Keeps the first `limit` courses of an already-ranked list.
pub struct TopNFilter {
    limit: usize,
}

impl TopNFilter {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Filter for TopNFilter {
    fn name(&self) -> &str {
        "TopNFilter"
    }

    fn apply(&self, mut scored: Vec<ScoredCourse>) -> Result<Vec<ScoredCourse>> {
        scored.truncate(self.limit);
        Ok(scored)
    }
}
