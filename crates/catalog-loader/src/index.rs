//! Catalog loading and validation.
//!
//! `CourseCatalog::load_from_file` is the one entry point used at startup.
//! Any failure here aborts initialization.

use crate::error::{CatalogLoadError, Result};
use crate::parser;
use crate::types::CourseCatalog;
use std::path::Path;
use tracing::{debug, info, warn};

impl CourseCatalog {
    /// Load the course catalog from a CSV file
    ///
    /// Steps:
    /// 1. Check the file exists
    /// 2. Parse every row into a `CourseRecord`
    /// 3. Reject a catalog with no courses
    /// 4. Build the catalog (ids follow file order)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading course catalog from {}", path.display());

        if !path.is_file() {
            return Err(CatalogLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let courses = parser::parse_courses(path)?;
        if courses.is_empty() {
            return Err(CatalogLoadError::EmptyCatalog {
                path: path.display().to_string(),
            });
        }

        let catalog = CourseCatalog::from_records(courses);
        catalog.report_duplicates();

        info!("Loaded {} courses", catalog.len());
        Ok(catalog)
    }

    /// Duplicate names are allowed but usually a data-entry mistake.
    fn report_duplicates(&self) {
        for (name, ids) in &self.name_index {
            if ids.len() > 1 {
                warn!("Course name {:?} appears {} times (ids {:?})", name, ids.len(), ids);
            }
        }
        debug!("{} distinct course names", self.name_index.len());
    }

    /// Number of distinct providers, for summaries
    pub fn provider_count(&self) -> usize {
        let mut providers: Vec<&str> = self.courses.iter().map(|c| c.provider.as_str()).collect();
        providers.sort_unstable();
        providers.dedup();
        providers.len()
    }
}
