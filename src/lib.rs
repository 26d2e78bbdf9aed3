//! # statboard
//!
//! Reactive statistics dashboards over in-memory CSV tables, served as
//! JSON chart descriptors over HTTP and WebSocket.
//!
//! ## Features
//!
//! - **Load once**: each dataset is read into an immutable [`RowTable`] at startup
//! - **Filter-group-aggregate**: mean/sum of a measure per group, in first-appearance order
//! - **Chart descriptors**: line, bar and pie charts as plain serializable data
//! - **Reactive recompute**: any input change recomputes every bound output
//!
//! ## Modules
//!
//! - [`table`]: CSV loading and the in-memory row table
//! - [`aggregate`]: Filter, group and aggregate engine
//! - [`chart`]: Chart descriptors built from aggregate results
//! - [`dashboard`]: View templates, bindings and the two dashboards
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Interactive sessions over WebSocket
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use statboard::dashboard::{Dashboard, FlightDelayDashboard, InputValues};
//! use statboard::table::{load_table, DataSource};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = DataSource::parse("airline_data.csv");
//!     let table = load_table(&source, &FlightDelayDashboard::load_options()).await?;
//!
//!     let dashboard = FlightDelayDashboard::new(Arc::new(table))?;
//!     let mut inputs = InputValues::new();
//!     inputs.insert("input-year".to_string(), serde_json::json!("2010"));
//!
//!     for output in dashboard.recompute(&inputs)? {
//!         println!("{}", output.id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod bootstrap;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod table;
pub mod telemetry;
pub mod websocket;

// Re-export top-level types for convenience
pub use table::{
    load_table, parse_csv, Column, ColumnType, DataSource, LoadOptions, RowTable, TableError,
    TableInfo, TextEncoding, Value,
};

pub use aggregate::{aggregate, AggregateError, AggregateQuery, AggregateResult, AggregationFunc, Filter};

pub use chart::{ChartDescriptor, ChartError, ChartKind, Point, Series};

pub use dashboard::{
    AutomobileSalesDashboard, Binding, Component, Dashboard, DashboardError, DashboardRegistry,
    FlightDelayDashboard, InputValues, Output, OutputValue, Session, Slot,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use websocket::{websocket_handler, ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage};

pub use config::{Config, ConfigError, DatasetConfig, LogFormat, LoggingConfig, ServerConfig};
