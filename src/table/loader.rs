//! CSV Loader
//!
//! Reads a local file or a remote URL into a [`RowTable`].
//! Column types are inferred unless a type hint pins them.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use super::error::{TableError, TableResult};
use super::types::{Column, ColumnData, ColumnType, RowTable};

/// Cell texts treated as missing
const NULL_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL"];

/// Where a dataset comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Local file
    Path(PathBuf),
    /// Remote CSV fetched over HTTP(S)
    Url(String),
}

impl DataSource {
    /// Interpret a configured location; `http://` and `https://` prefixes mean a URL
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::Path(PathBuf::from(trimmed))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Url(u) => write!(f, "{}", u),
        }
    }
}

/// Text encoding of the CSV bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum TextEncoding {
    /// UTF-8; invalid sequences are replaced
    #[default]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    /// ISO-8859-1; every byte is the code point of the same value
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
}

impl TextEncoding {
    fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

/// Options controlling how a CSV becomes a table
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub encoding: TextEncoding,
    pub type_hints: HashMap<String, ColumnType>,
    pub required_columns: Vec<String>,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text encoding
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Pin a column to a type instead of inferring it
    pub fn with_type_hint(mut self, column: &str, column_type: ColumnType) -> Self {
        self.type_hints.insert(column.to_string(), column_type);
        self
    }

    /// Require columns to be present
    pub fn with_required_columns(mut self, columns: &[&str]) -> Self {
        self.required_columns
            .extend(columns.iter().map(|c| c.to_string()));
        self
    }
}

/// Load a table from a file or URL
pub async fn load_table(source: &DataSource, options: &LoadOptions) -> TableResult<RowTable> {
    let start = Instant::now();

    let bytes = match source {
        DataSource::Path(path) => tokio::fs::read(path).await?,
        DataSource::Url(url) => fetch(url).await?,
    };

    let table = parse_csv(bytes.as_slice(), source.to_string(), options)?;

    tracing::info!(
        source = %source,
        rows = table.row_count(),
        columns = table.columns().len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Loaded table"
    );

    Ok(table)
}

async fn fetch(url: &str) -> TableResult<Vec<u8>> {
    tracing::debug!(url = %url, "Fetching remote dataset");
    let response = reqwest::get(url).await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

/// Parse CSV from any reader
pub fn parse_csv<R: Read>(
    reader: R,
    source: impl Into<String>,
    options: &LoadOptions,
) -> TableResult<RowTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| options.encoding.decode(h).trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(TableError::MissingHeader);
    }

    for required in &options.required_columns {
        if !headers.contains(required) {
            return Err(TableError::MissingColumn(required.clone()));
        }
    }

    // Column-major raw cells
    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for result in reader.byte_records() {
        let record = result?;
        for (col, field) in record.iter().enumerate() {
            let text = options.encoding.decode(field);
            let text = text.trim();
            raw[col].push(if NULL_MARKERS.contains(&text) {
                None
            } else {
                Some(text.to_string())
            });
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| {
            let column_type = options
                .type_hints
                .get(&name)
                .copied()
                .unwrap_or_else(|| infer_type(&cells));
            build_column(name, cells, column_type)
        })
        .collect::<TableResult<Vec<_>>>()?;

    RowTable::new(source, columns)
}

/// Narrowest type that every present cell parses as
fn infer_type(cells: &[Option<String>]) -> ColumnType {
    let present = || cells.iter().flatten();

    if present().all(|c| c.parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if present().all(|c| c.parse::<f64>().is_ok()) {
        ColumnType::Float
    } else {
        ColumnType::Text
    }
}

fn build_column(
    name: String,
    cells: Vec<Option<String>>,
    column_type: ColumnType,
) -> TableResult<Column> {
    let mismatch = |row: usize, value: &str| TableError::TypeMismatch {
        column: name.clone(),
        row,
        value: value.to_string(),
        expected: column_type.to_string(),
    };

    let data = match column_type {
        ColumnType::Integer => ColumnData::Integer(
            cells
                .iter()
                .enumerate()
                .map(|(row, cell)| match cell {
                    Some(s) => s.parse::<i64>().map(Some).map_err(|_| mismatch(row, s)),
                    None => Ok(None),
                })
                .collect::<TableResult<_>>()?,
        ),
        ColumnType::Float => ColumnData::Float(
            cells
                .iter()
                .enumerate()
                .map(|(row, cell)| match cell {
                    Some(s) => s.parse::<f64>().map(Some).map_err(|_| mismatch(row, s)),
                    None => Ok(None),
                })
                .collect::<TableResult<_>>()?,
        ),
        ColumnType::Text => ColumnData::Text(cells),
    };

    Ok(Column::new(name, data))
}
