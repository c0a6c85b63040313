//! Core traits for the ranking pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to scored courses.

use anyhow::Result;
use scoring::ScoredCourse;

/// Core trait for filtering scored courses.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared by concurrent recommend calls
/// - Filters take ownership of the Vec and return a filtered Vec
/// - Filters see courses already ranked and must preserve their order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a ranked list of scored courses.
    fn apply(&self, scored: Vec<ScoredCourse>) -> Result<Vec<ScoredCourse>>;
}
