//! Input values
//!
//! Current values of a dashboard's input controls, keyed by control id.
//! Values arrive as JSON from the client, so a year may be a number or a
//! string.

use indexmap::IndexMap;
use serde_json::Value as Json;

/// Input control id → current value
pub type InputValues = IndexMap<String, Json>;

/// Read a year from an input value.
///
/// Accepts a JSON integer, an integral float, or a string holding an
/// integer. Anything else is `None`.
pub fn parse_year(value: Option<&Json>) -> Option<i64> {
    match value? {
        Json::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Json::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Text form of an input value, as shown in chart titles
pub fn as_text(value: Option<&Json>) -> Option<String> {
    match value? {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        Json::Bool(b) => Some(b.to_string()),
        Json::Null | Json::Array(_) | Json::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year(Some(&json!(2010))), Some(2010));
        assert_eq!(parse_year(Some(&json!("1980"))), Some(1980));
        assert_eq!(parse_year(Some(&json!(" 2001 "))), Some(2001));
        assert_eq!(parse_year(Some(&json!(2010.0))), Some(2010));
    }

    #[test]
    fn test_parse_year_rejects() {
        assert_eq!(parse_year(None), None);
        assert_eq!(parse_year(Some(&json!(null))), None);
        assert_eq!(parse_year(Some(&json!(""))), None);
        assert_eq!(parse_year(Some(&json!("twenty ten"))), None);
        assert_eq!(parse_year(Some(&json!(2010.5))), None);
        assert_eq!(parse_year(Some(&json!([2010]))), None);
    }

    #[test]
    fn test_as_text() {
        assert_eq!(as_text(Some(&json!("1980"))), Some("1980".to_string()));
        assert_eq!(as_text(Some(&json!(1980))), Some("1980".to_string()));
        assert_eq!(as_text(Some(&json!(null))), None);
        assert_eq!(as_text(None), None);
    }
}
