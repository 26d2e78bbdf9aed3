//! Aggregate queries
//!
//! Describes one grouped aggregation over a [`RowTable`](crate::table::RowTable):
//!
//! ```text
//! MEAN(CarrierDelay) WHERE Year = 2010 GROUP BY Month, Reporting_Airline
//! ```

use serde::{Deserialize, Serialize};

use crate::table::Value;

/// Aggregation functions applied per group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationFunc {
    /// Arithmetic mean of the present values
    Mean,
    /// Sum of the present values
    Sum,
}

impl AggregationFunc {
    /// Apply the aggregation to the present values of one group.
    ///
    /// A group without values has no mean; its sum is zero.
    pub fn apply(&self, values: &[f64]) -> Option<f64> {
        match self {
            Self::Mean if values.is_empty() => None,
            Self::Mean => Some(values.iter().sum::<f64>() / values.len() as f64),
            Self::Sum => Some(values.iter().sum()),
        }
    }
}

impl std::fmt::Display for AggregationFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mean => write!(f, "MEAN"),
            Self::Sum => write!(f, "SUM"),
        }
    }
}

/// Equality filter: keep rows where `column` equals `value`
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

impl Filter {
    /// Create an equality filter
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.column, self.value)
    }
}

/// A grouped aggregation ready for execution
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateQuery {
    /// Numeric column to summarize
    pub measure: String,
    /// Summary function
    pub func: AggregationFunc,
    /// Filters, all of which must match
    pub filters: Vec<Filter>,
    /// Group key columns, in key order
    pub group_by: Vec<String>,
}

impl AggregateQuery {
    /// Start building a query over a measure column
    pub fn measure(column: &str, func: AggregationFunc) -> AggregateQueryBuilder {
        AggregateQueryBuilder::new(column, func)
    }
}

impl std::fmt::Display for AggregateQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.func, self.measure)?;
        for (i, filter) in self.filters.iter().enumerate() {
            let keyword = if i == 0 { "WHERE" } else { "AND" };
            write!(f, " {} {}", keyword, filter)?;
        }
        if !self.group_by.is_empty() {
            write!(f, " GROUP BY {}", self.group_by.join(", "))?;
        }
        Ok(())
    }
}

/// Builder for [`AggregateQuery`]
#[derive(Debug, Clone)]
pub struct AggregateQueryBuilder {
    query: AggregateQuery,
}

impl AggregateQueryBuilder {
    fn new(measure: &str, func: AggregationFunc) -> Self {
        Self {
            query: AggregateQuery {
                measure: measure.to_string(),
                func,
                filters: Vec::new(),
                group_by: Vec::new(),
            },
        }
    }

    /// Add an equality filter
    pub fn filter(mut self, filter: Filter) -> Self {
        self.query.filters.push(filter);
        self
    }

    /// Set the group key columns
    pub fn group_by(mut self, columns: &[&str]) -> Self {
        self.query.group_by = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn build(self) -> AggregateQuery {
        self.query
    }
}
