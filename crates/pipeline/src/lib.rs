//! Ranking pipeline for course recommendations.
//!
//! This crate provides:
//! - Filter trait and implementations for trimming the similarity ranking
//! - FilterPipeline for composing filters
//! - Keyword rules that force suggestions regardless of similarity
//!
//! ## Architecture
//! The similarity side processes scored courses in stages:
//! 1. Courses are ranked by score (stable, so ties keep catalog order)
//! 2. `MinimumScoreFilter` drops weak matches
//! 3. `TopNFilter` caps the list
//!
//! The keyword side runs on the raw message and is merged in front.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, KeywordRuleSet};
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(MinimumScoreFilter::new(0.1))
//!     .add_filter(TopNFilter::new(5));
//!
//! let similar = pipeline.apply(ranked)?;
//! let forced = KeywordRuleSet::default().forced_suggestions(message); // (topic, suggestion) pairs
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod keywords;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use keywords::{ForcedSuggestion, KeywordRule, KeywordRuleSet, Suggestion};
