//! # Catalog Loader Crate
//!
//! This crate loads the training-program catalog that every recommendation
//! is scored against.
//!
//! ## Main Components
//!
//! - **types**: `CourseRecord` and the ordered `CourseCatalog`
//! - **parser**: CSV parsing with header-based column lookup
//! - **index**: `CourseCatalog::load_from_file` and load-time checks
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog_loader::CourseCatalog;
//! use std::path::Path;
//!
//! let catalog = CourseCatalog::load_from_file(Path::new("data/training_programs.csv"))?;
//! for course in catalog.courses() {
//!     println!("{} by {}", course.name, course.provider);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{CatalogLoadError, Result};
pub use types::{CourseCatalog, CourseId, CourseRecord};
