//! Core domain types for the training-program catalog.
//!
//! The catalog is loaded once at startup and shared read-only between
//! every recommendation call, so nothing here hands out `&mut` access
//! after construction except the insert helpers used while loading.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a course in the catalog (0-based, file order)
pub type CourseId = usize;

// =============================================================================
// Course Types
// =============================================================================

/// A single training program from the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: CourseId,
    pub name: String,
    pub provider: String,
    /// Free-text description used for similarity scoring
    pub description: String,
}

impl CourseRecord {
    /// Build a record; the id is assigned when it is inserted into a catalog.
    pub fn new(
        name: impl Into<String>,
        provider: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            provider: provider.into(),
            description: description.into(),
        }
    }
}

// =============================================================================
// CourseCatalog - ordered, read-only course table
// =============================================================================

/// Ordered collection of courses with a case-insensitive name index.
///
/// Order matters: ties in similarity ranking are broken by catalog order,
/// so courses are kept in a `Vec` rather than a map.
#[derive(Debug, Clone, Default)]
pub struct CourseCatalog {
    pub(crate) courses: Vec<CourseRecord>,
    /// Lowercased course name -> ids (names are not guaranteed unique)
    pub(crate) name_index: HashMap<String, Vec<CourseId>>,
}

impl CourseCatalog {
    /// Creates a new, empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from records in the given order.
    pub fn from_records(records: impl IntoIterator<Item = CourseRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert_course(record);
        }
        catalog
    }

    /// Append a course, assigning it the next id.
    pub fn insert_course(&mut self, mut course: CourseRecord) -> CourseId {
        let id = self.courses.len();
        course.id = id;
        self.name_index
            .entry(course.name.to_lowercase())
            .or_insert_with(Vec::new)
            .push(id);
        self.courses.push(course);
        id
    }

    /// Get a course by id
    pub fn get_course(&self, id: CourseId) -> Option<&CourseRecord> {
        self.courses.get(id)
    }

    /// All courses in catalog order
    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    /// Descriptions in catalog order, borrowed
    pub fn descriptions(&self) -> Vec<&str> {
        self.courses.iter().map(|c| c.description.as_str()).collect()
    }

    /// Courses whose name matches exactly (ignoring case)
    pub fn find_by_name(&self, name: &str) -> Vec<&CourseRecord> {
        self.name_index
            .get(&name.to_lowercase())
            .map(|ids| ids.iter().filter_map(|&id| self.courses.get(id)).collect())
            .unwrap_or_default()
    }

    /// Courses whose name contains `query` (ignoring case), in catalog order
    pub fn search_by_name(&self, query: &str) -> Vec<&CourseRecord> {
        let query = query.to_lowercase();
        self.courses
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&query))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
