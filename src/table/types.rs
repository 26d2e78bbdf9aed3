//! Core data types for the in-memory row table
//!
//! - `Value`: a single cell or group key
//! - `ColumnType` / `Column`: typed, columnar storage
//! - `RowTable`: the immutable dataset shared by all dashboards
//! - `TableInfo`: summary exposed on the API and in logs

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::{TableError, TableResult};

/// A single cell value
///
/// Hashable so it can be used as a group key. Serialized untagged:
/// numbers stay numbers, text stays a string, missing becomes `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing cell
    Null,
    /// Integer cell
    Int(i64),
    /// Floating point cell
    Float(OrderedFloat<f64>),
    /// Text cell
    Text(String),
}

impl Value {
    /// Check if this value is missing
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(f.into_inner()),
            Value::Null | Value::Text(_) => None,
        }
    }

    /// Equality used by filters.
    ///
    /// Numbers compare by numeric value regardless of representation,
    /// text compares exactly, and `Null` matches nothing.
    pub fn matches(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(OrderedFloat(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Storage type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integers
    Integer,
    /// 64-bit floats
    Float,
    /// UTF-8 text
    Text,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Text => write!(f, "text"),
        }
    }
}

/// Typed cell storage for one column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            ColumnData::Integer(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a column from typed data
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Storage type
    pub fn column_type(&self) -> ColumnType {
        match self.data {
            ColumnData::Integer(_) => ColumnType::Integer,
            ColumnData::Float(_) => ColumnType::Float,
            ColumnData::Text(_) => ColumnType::Text,
        }
    }

    /// Underlying cells
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the column has no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the column holds numbers
    pub fn is_numeric(&self) -> bool {
        !matches!(self.data, ColumnData::Text(_))
    }

    /// Cell at `row` as a [`Value`]; out-of-range rows read as `Null`
    pub fn value(&self, row: usize) -> Value {
        match &self.data {
            ColumnData::Integer(v) => v.get(row).copied().flatten().map_or(Value::Null, Value::Int),
            ColumnData::Float(v) => v
                .get(row)
                .copied()
                .flatten()
                .map_or(Value::Null, |f| Value::Float(OrderedFloat(f))),
            ColumnData::Text(v) => v
                .get(row)
                .and_then(|s| s.clone())
                .map_or(Value::Null, Value::Text),
        }
    }

    /// Numeric cell at `row`; `None` for missing or text cells
    pub fn number(&self, row: usize) -> Option<f64> {
        match &self.data {
            ColumnData::Integer(v) => v.get(row).copied().flatten().map(|i| i as f64),
            ColumnData::Float(v) => v.get(row).copied().flatten().filter(|f| !f.is_nan()),
            ColumnData::Text(_) => None,
        }
    }

    /// Number of missing cells
    pub fn null_count(&self) -> usize {
        match &self.data {
            ColumnData::Integer(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Float(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Text(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }
}

/// Immutable columnar table loaded once at start-up
#[derive(Debug, Clone)]
pub struct RowTable {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    row_count: usize,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl RowTable {
    /// Build a table from columns of equal length
    pub fn new(source: impl Into<String>, columns: Vec<Column>) -> TableResult<Self> {
        let row_count = columns.first().map(|c| c.len()).unwrap_or(0);
        let mut index = HashMap::with_capacity(columns.len());

        for (i, column) in columns.iter().enumerate() {
            if index.insert(column.name().to_string(), i).is_some() {
                return Err(TableError::DuplicateColumn(column.name().to_string()));
            }
            if column.len() != row_count {
                return Err(TableError::RaggedColumn {
                    column: column.name().to_string(),
                    len: column.len(),
                    expected: row_count,
                });
            }
        }

        Ok(Self {
            columns,
            index,
            row_count,
            source: source.into(),
            loaded_at: Utc::now(),
        })
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Check if a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All columns in file order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in file order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Where the table was loaded from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Fail with the first missing column of `required`
    pub fn require(&self, required: &[&str]) -> TableResult<()> {
        match required.iter().find(|name| !self.has_column(name)) {
            Some(name) => Err(TableError::MissingColumn(name.to_string())),
            None => Ok(()),
        }
    }

    /// Summary of the table
    pub fn info(&self) -> TableInfo {
        TableInfo {
            source: self.source.clone(),
            rows: self.row_count,
            columns: self
                .columns
                .iter()
                .map(|c| ColumnInfo {
                    name: c.name().to_string(),
                    column_type: c.column_type(),
                    nulls: c.null_count(),
                })
                .collect(),
            loaded_at: self.loaded_at,
        }
    }
}

/// Summary of a loaded table
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub source: String,
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
    pub loaded_at: DateTime<Utc>,
}

/// Summary of one column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub nulls: usize,
}

impl std::fmt::Display for TableInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows, {} columns from {}",
            self.rows,
            self.columns.len(),
            self.source
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RowTable {
        RowTable::new(
            "memory",
            vec![
                Column::new("Year", ColumnData::Integer(vec![Some(2010), Some(2011), None])),
                Column::new("Delay", ColumnData::Float(vec![Some(1.5), None, Some(3.0)])),
                Column::new(
                    "Airline",
                    ColumnData::Text(vec![Some("AA".into()), Some("UA".into()), None]),
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_value_matches_across_numeric_types() {
        assert!(Value::Int(2010).matches(&Value::from(2010.0)));
        assert!(Value::from(1980.0).matches(&Value::Int(1980)));
        assert!(!Value::Int(2010).matches(&Value::Int(2011)));
        assert!(!Value::Int(2010).matches(&Value::from("2010")));
        assert!(!Value::Null.matches(&Value::Null));
        assert!(Value::from("AA").matches(&Value::from("AA")));
    }

    #[test]
    fn test_value_serializes_untagged() {
        let json = serde_json::to_string(&vec![
            Value::Int(3),
            Value::from(1.5),
            Value::from("AA"),
            Value::Null,
        ])
        .unwrap();
        assert_eq!(json, r#"[3,1.5,"AA",null]"#);
    }

    #[test]
    fn test_column_access() {
        let table = sample_table();
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_names(), vec!["Year", "Delay", "Airline"]);

        let year = table.column("Year").unwrap();
        assert_eq!(year.column_type(), ColumnType::Integer);
        assert_eq!(year.value(0), Value::Int(2010));
        assert_eq!(year.value(2), Value::Null);
        assert_eq!(year.value(99), Value::Null);
        assert_eq!(year.number(1), Some(2011.0));

        let airline = table.column("Airline").unwrap();
        assert!(!airline.is_numeric());
        assert_eq!(airline.number(0), None);
        assert_eq!(airline.null_count(), 1);
    }

    #[test]
    fn test_require_reports_missing_column() {
        let table = sample_table();
        assert!(table.require(&["Year", "Delay"]).is_ok());
        let err = table.require(&["Year", "Month"]).unwrap_err();
        assert!(matches!(err, TableError::MissingColumn(ref c) if c == "Month"));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let result = RowTable::new(
            "memory",
            vec![
                Column::new("Year", ColumnData::Integer(vec![Some(1)])),
                Column::new("Year", ColumnData::Integer(vec![Some(2)])),
            ],
        );
        assert!(matches!(result, Err(TableError::DuplicateColumn(_))));
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let result = RowTable::new(
            "memory",
            vec![
                Column::new("Year", ColumnData::Integer(vec![Some(1), Some(2)])),
                Column::new("Month", ColumnData::Integer(vec![Some(1)])),
            ],
        );
        match result {
            Err(TableError::RaggedColumn { column, len, expected }) => {
                assert_eq!(column, "Month");
                assert_eq!(len, 1);
                assert_eq!(expected, 2);
            }
            other => panic!("Expected RaggedColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_info_summary() {
        let info = sample_table().info();
        assert_eq!(info.rows, 3);
        assert_eq!(info.columns.len(), 3);
        assert_eq!(info.columns[1].column_type, ColumnType::Float);
        assert_eq!(info.columns[1].nulls, 1);
        assert!(info.to_string().starts_with("3 rows, 3 columns"));
    }
}
