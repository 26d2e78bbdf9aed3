//! Dashboard error types

use thiserror::Error;

/// Errors that can occur while building or driving a dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// No dashboard registered under this id
    #[error("Dashboard not found: {0}")]
    UnknownDashboard(String),

    /// A dashboard with this id is already registered
    #[error("Dashboard already registered: {0}")]
    DuplicateDashboard(String),

    /// Input id is not bound to the dashboard's handler
    #[error("Unknown input {input} for dashboard {dashboard}")]
    UnknownInput { dashboard: String, input: String },

    /// Session has not opened this dashboard
    #[error("Dashboard not open in this session: {0}")]
    NotOpen(String),

    /// Backing table is unusable (schema mismatch)
    #[error("Table error: {0}")]
    Table(#[from] crate::table::TableError),

    /// Aggregation failed
    #[error("Aggregation error: {0}")]
    Aggregate(#[from] crate::aggregate::AggregateError),

    /// Chart construction failed
    #[error("Chart error: {0}")]
    Chart(#[from] crate::chart::ChartError),
}

/// Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
