//! Aggregation error types

use thiserror::Error;

/// Errors that can occur while aggregating a table
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    /// Referenced column does not exist
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Measure column holds text
    #[error("Measure column is not numeric: {0}")]
    NonNumericMeasure(String),
}
