//! Aggregation Engine
//!
//! Filter, group and summarize a [`RowTable`](crate::table::RowTable):
//!
//! - **query**: `AggregateQuery`, `Filter`, `AggregationFunc` and the query builder
//! - **executor**: `aggregate()` and `AggregateResult`
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,ignore
//! use statboard::aggregate::{aggregate, AggregateQuery, AggregationFunc, Filter};
//!
//! let query = AggregateQuery::measure("CarrierDelay", AggregationFunc::Mean)
//!     .filter(Filter::eq("Year", 2010))
//!     .group_by(&["Month", "Reporting_Airline"])
//!     .build();
//!
//! let result = aggregate(&table, &query)?;
//! println!("{} groups", result.len());
//! ```

pub mod error;
pub mod executor;
pub mod query;

pub use error::AggregateError;
pub use executor::{aggregate, AggregateResult, AggregateRow, FieldRef};
pub use query::{AggregateQuery, AggregateQueryBuilder, AggregationFunc, Filter};
