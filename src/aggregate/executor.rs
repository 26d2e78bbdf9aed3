//! Aggregate Executor
//!
//! Runs an [`AggregateQuery`] against a [`RowTable`]:
//!
//! ```text
//! Resolve columns → Filter rows → Group (first-appearance order) → Summarize
//! ```
//!
//! Rows with a missing group key are dropped. Groups are never sorted.

use indexmap::{IndexMap, IndexSet};
use std::time::Instant;

use super::error::AggregateError;
use super::query::{AggregateQuery, AggregationFunc};
use crate::table::{Column, RowTable, Value};

/// One group of an aggregate
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    /// Key values, one per group column
    pub keys: Vec<Value>,
    /// Summary of the measure; `None` for a mean over no values
    pub value: Option<f64>,
}

/// Where a chart field comes from in an aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRef {
    /// Group key at this position
    Key(usize),
    /// The aggregated measure
    Measure,
}

/// Grouped summary of one measure
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    /// Group key column names
    pub group_by: Vec<String>,
    /// Measure column name
    pub measure: String,
    /// Summary function used
    pub func: AggregationFunc,
    /// One row per distinct key, in first-appearance order
    pub rows: Vec<AggregateRow>,
    /// Rows examined
    pub rows_scanned: usize,
    /// Rows that passed the filters
    pub rows_matched: usize,
}

impl AggregateResult {
    /// An aggregate with the shape of `query` and no groups
    pub fn empty(query: &AggregateQuery) -> Self {
        Self {
            group_by: query.group_by.clone(),
            measure: query.measure.clone(),
            func: query.func,
            rows: Vec::new(),
            rows_scanned: 0,
            rows_matched: 0,
        }
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no groups
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Resolve a field name to a group key or the measure
    pub fn field(&self, name: &str) -> Option<FieldRef> {
        if let Some(i) = self.group_by.iter().position(|c| c == name) {
            Some(FieldRef::Key(i))
        } else if self.measure == name {
            Some(FieldRef::Measure)
        } else {
            None
        }
    }

    /// Distinct values of a group column, first-appearance order
    pub fn distinct(&self, column: &str) -> Vec<Value> {
        let Some(FieldRef::Key(i)) = self.field(column) else {
            return Vec::new();
        };
        let seen: IndexSet<&Value> = self.rows.iter().map(|row| &row.keys[i]).collect();
        seen.into_iter().cloned().collect()
    }
}

/// Execute an aggregate query
pub fn aggregate(
    table: &RowTable,
    query: &AggregateQuery,
) -> Result<AggregateResult, AggregateError> {
    let start = Instant::now();

    let measure = resolve(table, &query.measure)?;
    if !measure.is_numeric() {
        return Err(AggregateError::NonNumericMeasure(query.measure.clone()));
    }

    let filters = query
        .filters
        .iter()
        .map(|f| resolve(table, &f.column).map(|c| (c, &f.value)))
        .collect::<Result<Vec<_>, _>>()?;

    let keys = query
        .group_by
        .iter()
        .map(|name| resolve(table, name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut groups: IndexMap<Vec<Value>, Vec<f64>> = IndexMap::new();
    let mut rows_matched = 0;

    'rows: for row in 0..table.row_count() {
        if !filters
            .iter()
            .all(|(column, value)| column.value(row).matches(value))
        {
            continue;
        }
        rows_matched += 1;

        let mut key = Vec::with_capacity(keys.len());
        for column in &keys {
            let value = column.value(row);
            if value.is_null() {
                continue 'rows;
            }
            key.push(value);
        }

        let values = groups.entry(key).or_default();
        if let Some(v) = measure.number(row) {
            values.push(v);
        }
    }

    let rows = groups
        .into_iter()
        .map(|(keys, values)| AggregateRow {
            keys,
            value: query.func.apply(&values),
        })
        .collect::<Vec<_>>();

    tracing::trace!(
        query = %query,
        groups = rows.len(),
        rows_matched,
        elapsed_us = start.elapsed().as_micros() as u64,
        "Aggregated"
    );

    Ok(AggregateResult {
        group_by: query.group_by.clone(),
        measure: query.measure.clone(),
        func: query.func,
        rows,
        rows_scanned: table.row_count(),
        rows_matched,
    })
}

fn resolve<'a>(table: &'a RowTable, name: &str) -> Result<&'a Column, AggregateError> {
    table
        .column(name)
        .ok_or_else(|| AggregateError::ColumnNotFound(name.to_string()))
}
