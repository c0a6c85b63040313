//! Filter implementations for the ranking pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod minimum_score;
pub mod top_n;

// Re-export for convenience
pub use minimum_score::MinimumScoreFilter;
pub use top_n::TopNFilter;
