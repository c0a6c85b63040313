//! Error types for the catalog-loader crate.
//!
//! Every variant here is fatal at startup: a recommender is never built
//! from a catalog that failed to load.

use thiserror::Error;

/// Errors that can occur while loading and validating the course catalog
#[derive(Error, Debug)]
pub enum CatalogLoadError {
    /// Catalog file could not be found
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the file (bad quoting, ragged rows, invalid UTF-8)
    #[error("Malformed CSV in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// One of the required header columns is absent
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// A data row couldn't be turned into a course record
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// A field is present but unusable (e.g. blank course name)
    #[error("Invalid value for {field} at line {line}: {value:?}")]
    InvalidValue {
        field: String,
        value: String,
        line: u64,
    },

    /// Header is present but there are no data rows
    #[error("Catalog {path} contains no courses")]
    EmptyCatalog { path: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogLoadError>;
