//! Chart Descriptors
//!
//! Renderer-agnostic descriptions of line, bar and pie charts, built from an
//! [`AggregateResult`]. A descriptor carries no behavior; clients draw it.
//!
//! ```json
//! {
//!   "kind": "line",
//!   "title": "Average Carrier Delay Time (minutes) by Airline",
//!   "x_field": "Month",
//!   "y_field": "CarrierDelay",
//!   "color_field": "Reporting_Airline",
//!   "series": [{"name": "AA", "points": [{"x": 1, "y": 5.0}]}]
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregate::{AggregateResult, AggregateRow, FieldRef};
use crate::table::Value;

/// Kind of chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartKind::Line => write!(f, "line"),
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Pie => write!(f, "pie"),
        }
    }
}

/// One point of a series; for pie charts `x` is the slice name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: Value,
    pub y: Option<f64>,
}

/// A named sequence of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

/// Declarative chart description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescriptor {
    pub kind: ChartKind,
    pub title: String,
    /// Field on the x axis (slice names for pie charts)
    pub x_field: String,
    /// Field on the y axis (slice values for pie charts)
    pub y_field: String,
    /// Field that splits the data into one series per value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_field: Option<String>,
    pub series: Vec<Series>,
}

impl ChartDescriptor {
    /// Line chart; with a color field, one series per distinct color value
    pub fn line(
        result: &AggregateResult,
        x: &str,
        y: &str,
        color: Option<&str>,
        title: impl Into<String>,
    ) -> ChartResult<Self> {
        let x_ref = field(result, x)?;
        let y_ref = field(result, y)?;

        let series = match color {
            Some(color_name) => {
                let color_ref = field(result, color_name)?;
                let mut by_color: indexmap::IndexMap<String, Vec<Point>> =
                    indexmap::IndexMap::new();
                for row in &result.rows {
                    by_color
                        .entry(pick(row, color_ref).to_string())
                        .or_default()
                        .push(point(row, x_ref, y_ref));
                }
                by_color
                    .into_iter()
                    .map(|(name, points)| Series { name, points })
                    .collect()
            }
            None => single_series(result, y, x_ref, y_ref),
        };

        Ok(Self {
            kind: ChartKind::Line,
            title: title.into(),
            x_field: x.to_string(),
            y_field: y.to_string(),
            color_field: color.map(str::to_string),
            series,
        })
    }

    /// Bar chart with one bar per group
    pub fn bar(
        result: &AggregateResult,
        x: &str,
        y: &str,
        title: impl Into<String>,
    ) -> ChartResult<Self> {
        let x_ref = field(result, x)?;
        let y_ref = field(result, y)?;

        Ok(Self {
            kind: ChartKind::Bar,
            title: title.into(),
            x_field: x.to_string(),
            y_field: y.to_string(),
            color_field: None,
            series: single_series(result, y, x_ref, y_ref),
        })
    }

    /// Pie chart with one slice per group
    pub fn pie(
        result: &AggregateResult,
        names: &str,
        values: &str,
        title: impl Into<String>,
    ) -> ChartResult<Self> {
        let names_ref = field(result, names)?;
        let values_ref = field(result, values)?;

        Ok(Self {
            kind: ChartKind::Pie,
            title: title.into(),
            x_field: names.to_string(),
            y_field: values.to_string(),
            color_field: None,
            series: single_series(result, values, names_ref, values_ref),
        })
    }

    /// Check if the chart has nothing to draw
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Look up a series by name
    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}

fn single_series(result: &AggregateResult, name: &str, x: FieldRef, y: FieldRef) -> Vec<Series> {
    if result.is_empty() {
        return Vec::new();
    }
    vec![Series {
        name: name.to_string(),
        points: result.rows.iter().map(|row| point(row, x, y)).collect(),
    }]
}

fn field(result: &AggregateResult, name: &str) -> ChartResult<FieldRef> {
    result
        .field(name)
        .ok_or_else(|| ChartError::UnknownField(name.to_string()))
}

fn pick(row: &AggregateRow, field: FieldRef) -> Value {
    match field {
        FieldRef::Key(i) => row.keys[i].clone(),
        FieldRef::Measure => row.value.map_or(Value::Null, Value::from),
    }
}

fn point(row: &AggregateRow, x: FieldRef, y: FieldRef) -> Point {
    Point {
        x: pick(row, x),
        y: pick(row, y).as_f64(),
    }
}

/// Chart construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Field is neither a group column nor the measure
    #[error("Unknown chart field: {0}")]
    UnknownField(String),
}

/// Result type for chart construction
pub type ChartResult<T> = Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate, AggregateQuery, AggregationFunc, Filter};
    use crate::table::{parse_csv, LoadOptions, RowTable};

    const DELAYS: &str = "\
Year,Month,Reporting_Airline,CarrierDelay
2010,1,AA,4
2010,1,UA,2
2010,2,AA,6
2010,2,UA,8
2011,1,AA,1
";

    fn table() -> RowTable {
        parse_csv(DELAYS.as_bytes(), "memory", &LoadOptions::new()).unwrap()
    }

    fn by_month_and_airline(year: i64) -> AggregateResult {
        let query = AggregateQuery::measure("CarrierDelay", AggregationFunc::Mean)
            .filter(Filter::eq("Year", year))
            .group_by(&["Month", "Reporting_Airline"])
            .build();
        aggregate(&table(), &query).unwrap()
    }

    #[test]
    fn test_line_one_series_per_color() {
        let result = by_month_and_airline(2010);
        let chart = ChartDescriptor::line(
            &result,
            "Month",
            "CarrierDelay",
            Some("Reporting_Airline"),
            "Average Carrier Delay",
        )
        .unwrap();

        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.series.len(), 2);
        let aa = chart.series_named("AA").unwrap();
        assert_eq!(
            aa.points,
            vec![
                Point { x: Value::Int(1), y: Some(4.0) },
                Point { x: Value::Int(2), y: Some(6.0) },
            ]
        );
        assert_eq!(chart.series[1].name, "UA");
    }

    #[test]
    fn test_empty_result_has_no_series() {
        let result = by_month_and_airline(1990);
        let chart = ChartDescriptor::line(
            &result,
            "Month",
            "CarrierDelay",
            Some("Reporting_Airline"),
            "Average Carrier Delay",
        )
        .unwrap();

        assert!(chart.series.is_empty());
        assert!(chart.is_empty());

        let bar = ChartDescriptor::bar(&result, "Month", "CarrierDelay", "Bar").unwrap();
        assert!(bar.series.is_empty());
    }

    #[test]
    fn test_bar_and_pie_single_series() {
        let query = AggregateQuery::measure("CarrierDelay", AggregationFunc::Sum)
            .group_by(&["Reporting_Airline"])
            .build();
        let result = aggregate(&table(), &query).unwrap();

        let bar = ChartDescriptor::bar(&result, "Reporting_Airline", "CarrierDelay", "Bar").unwrap();
        assert_eq!(bar.series.len(), 1);
        assert_eq!(bar.series[0].name, "CarrierDelay");
        assert_eq!(bar.series[0].points.len(), 2);

        let pie = ChartDescriptor::pie(&result, "Reporting_Airline", "CarrierDelay", "Pie").unwrap();
        assert_eq!(pie.kind, ChartKind::Pie);
        assert_eq!(pie.series[0].points[0], Point { x: Value::from("AA"), y: Some(11.0) });
        assert_eq!(pie.series[0].points[1], Point { x: Value::from("UA"), y: Some(10.0) });
    }

    #[test]
    fn test_unknown_field() {
        let result = by_month_and_airline(2010);
        let err = ChartDescriptor::bar(&result, "Quarter", "CarrierDelay", "Bar").unwrap_err();
        assert_eq!(err, ChartError::UnknownField("Quarter".to_string()));
    }

    #[test]
    fn test_serialize_shape() {
        let result = by_month_and_airline(2011);
        let chart = ChartDescriptor::line(
            &result,
            "Month",
            "CarrierDelay",
            Some("Reporting_Airline"),
            "T",
        )
        .unwrap();

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"], "line");
        assert_eq!(json["color_field"], "Reporting_Airline");
        assert_eq!(json["series"][0]["name"], "AA");
        assert_eq!(json["series"][0]["points"][0]["x"], 1);
        assert_eq!(json["series"][0]["points"][0]["y"], 1.0);

        let bar = ChartDescriptor::bar(&result, "Month", "CarrierDelay", "T").unwrap();
        let json = serde_json::to_value(&bar).unwrap();
        assert!(json.get("color_field").is_none());
    }
}
