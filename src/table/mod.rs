//! Row Table
//!
//! In-memory, columnar datasets loaded once at start-up:
//!
//! - **types**: `Value`, `Column`, `RowTable`, `TableInfo`
//! - **loader**: CSV loading from a path or URL with type inference
//! - **error**: Error types
//!
//! A table is never mutated after loading. Dashboards hold it behind an
//! `Arc` and read it from every recompute.
//!
//! # Example
//!
//! ```rust,no_run
//! use statboard::table::{load_table, ColumnType, DataSource, LoadOptions, TextEncoding};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = LoadOptions::new()
//!         .with_encoding(TextEncoding::Latin1)
//!         .with_type_hint("Div1Airport", ColumnType::Text)
//!         .with_required_columns(&["Year", "Month"]);
//!
//!     let table = load_table(&DataSource::parse("airline_data.csv"), &options).await?;
//!     println!("{}", table.info());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod types;

pub use error::{TableError, TableResult};
pub use loader::{load_table, parse_csv, DataSource, LoadOptions, TextEncoding};
pub use types::{Column, ColumnData, ColumnInfo, ColumnType, RowTable, TableInfo, Value};
