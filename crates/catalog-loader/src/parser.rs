//! Parser for the training-program CSV file.
//!
//! Expected header (column order is free, extra columns are ignored):
//!
//! ```text
//! Course Name,Provider,Description
//! SQL Database Management,Udemy,"Learn SQL and database management"
//! ```
//!
//! Descriptions routinely contain commas, so quoting is handled by the
//! `csv` crate rather than by splitting lines.

use crate::error::{CatalogLoadError, Result};
use crate::types::CourseRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const COURSE_NAME_COLUMN: &str = "Course Name";
pub const PROVIDER_COLUMN: &str = "Provider";
pub const DESCRIPTION_COLUMN: &str = "Description";

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    name: usize,
    provider: usize,
    description: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord, file: &str) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| {
                    h.trim_start_matches('\u{feff}')
                        .trim()
                        .eq_ignore_ascii_case(column)
                })
                .ok_or_else(|| CatalogLoadError::MissingColumn {
                    file: file.to_string(),
                    column: column.to_string(),
                })
        };

        Ok(Self {
            name: find(COURSE_NAME_COLUMN)?,
            provider: find(PROVIDER_COLUMN)?,
            description: find(DESCRIPTION_COLUMN)?,
        })
    }
}

/// Parse the catalog file at `path`.
pub fn parse_courses(path: &Path) -> Result<Vec<CourseRecord>> {
    let file = File::open(path)?;
    parse_courses_from_reader(file, &path.display().to_string())
}

/// Parse catalog CSV from any reader. `file` is only used in error messages.
pub fn parse_courses_from_reader<R: Read>(reader: R, file: &str) -> Result<Vec<CourseRecord>> {
    let csv_error = |source: csv::Error| CatalogLoadError::Csv {
        file: file.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let layout = ColumnLayout::from_headers(reader.headers().map_err(csv_error)?, file)?;

    let mut courses = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        // Skip blank lines
        if row.iter().all(|field| field.is_empty()) {
            continue;
        }

        let field = |idx: usize, column: &str| {
            row.get(idx).ok_or_else(|| CatalogLoadError::ParseError {
                file: file.to_string(),
                line,
                reason: format!("Missing {}", column),
            })
        };

        let name = field(layout.name, COURSE_NAME_COLUMN)?;
        let provider = field(layout.provider, PROVIDER_COLUMN)?;
        let description = field(layout.description, DESCRIPTION_COLUMN)?;

        for (column, value) in [
            (COURSE_NAME_COLUMN, name),
            (PROVIDER_COLUMN, provider),
            (DESCRIPTION_COLUMN, description),
        ] {
            if value.is_empty() {
                return Err(CatalogLoadError::InvalidValue {
                    field: column.to_string(),
                    value: value.to_string(),
                    line,
                });
            }
        }

        courses.push(CourseRecord::new(name, provider, description));
    }

    Ok(courses)
}
