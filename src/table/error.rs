//! Table error types
//!
//! Errors raised while loading a dataset into a [`RowTable`](super::RowTable).
//! All of them are fatal at start-up.

use thiserror::Error;

/// Errors that can occur while loading a table
#[derive(Error, Debug)]
pub enum TableError {
    /// Local file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote source could not be fetched
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// CSV framing error (ragged rows, bad quoting)
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The file has no header row
    #[error("Missing header row")]
    MissingHeader,

    /// Two columns share a name
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// A required column is absent
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Columns of a table differ in length
    #[error("Column {column} has {len} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        len: usize,
        expected: usize,
    },

    /// A cell does not parse as the hinted column type
    #[error("Column {column} row {row}: cannot parse {value:?} as {expected}")]
    TypeMismatch {
        column: String,
        row: usize,
        value: String,
        expected: String,
    },
}

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;
