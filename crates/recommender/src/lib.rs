//! Recommender crate for the course recommendation tool.
//!
//! This crate contains the `CourseRecommender` that coordinates
//! normalization, similarity scoring, filtering and the keyword layer,
//! plus the configuration it is built from.

pub mod config;
pub mod recommender;

pub use config::{ConfigError, ConfigLoader, RecommenderConfig};
pub use recommender::{
    CourseRecommendation, CourseRecommender, RecommendationReport, RecommendationSource,
};
