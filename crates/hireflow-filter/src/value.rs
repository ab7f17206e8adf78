//! Scalar and nested values stored in a [`Record`](crate::Record).

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// A single field value.
///
/// JSON input never produces [`FieldValue::Date`]; that variant only appears
/// after [`Record::normalize_timestamps`](crate::Record::normalize_timestamps)
/// or when a caller builds records by hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
    List(Vec<FieldValue>),
    Object(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Returns `true` for [`FieldValue::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// ## Summary
    /// Renders the value the way a browser would stringify it for a
    /// substring search.
    ///
    /// `0` and `false` render as `"0"` and `"false"`, so they stay
    /// searchable. Objects and nulls are not searchable and yield `None`.
    #[must_use]
    pub fn search_text(&self) -> Option<String> {
        match self {
            Self::Null | Self::Object(_) => None,
            Self::Bool(b) => Some(b.to_string()),
            // -0 renders as "0".
            Self::Number(n) => Some((if *n == 0.0 { 0.0 } else { *n }).to_string()),
            Self::Text(s) => Some(s.clone()),
            Self::Date(dt) => Some(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::List(items) => Some(
                items
                    .iter()
                    .map(|item| item.search_text().unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }

    /// ## Summary
    /// Loose numeric coercion used by the fallback sort comparison.
    ///
    /// Booleans map to `0`/`1`, blank text to `0`, numeric text to its value
    /// and dates to epoch milliseconds. Anything else has no numeric value.
    #[must_use]
    pub fn coerce_number(&self) -> Option<f64> {
        match self {
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Number(n) => Some(*n),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            #[expect(
                clippy::cast_precision_loss,
                reason = "Millisecond timestamps fit well inside f64 mantissa"
            )]
            Self::Date(dt) => Some(dt.timestamp_millis() as f64),
            Self::Null | Self::List(_) | Self::Object(_) => None,
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_search_text_keeps_falsy_values() {
        assert_eq!(FieldValue::Number(0.0).search_text().as_deref(), Some("0"));
        assert_eq!(FieldValue::Bool(false).search_text().as_deref(), Some("false"));
        assert_eq!(FieldValue::Text(String::new()).search_text().as_deref(), Some(""));
        assert_eq!(FieldValue::Null.search_text(), None);
    }

    #[test]
    fn test_search_text_numbers_render_without_fraction() {
        assert_eq!(FieldValue::Number(7000.0).search_text().as_deref(), Some("7000"));
        assert_eq!(FieldValue::Number(2.5).search_text().as_deref(), Some("2.5"));
        assert_eq!(FieldValue::Number(-0.0).search_text().as_deref(), Some("0"));
        assert_eq!(FieldValue::Number(-4.0).search_text().as_deref(), Some("-4"));
    }

    #[test]
    fn test_search_text_list_and_date() {
        let list = FieldValue::List(vec!["Rust".into(), FieldValue::Null, 3.into()]);
        assert_eq!(list.search_text().as_deref(), Some("Rust,,3"));

        let date = FieldValue::Date(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        assert_eq!(
            date.search_text().as_deref(),
            Some("2024-01-02T03:04:05.000Z")
        );
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(FieldValue::Bool(true).coerce_number(), Some(1.0));
        assert_eq!(FieldValue::from(" 42 ").coerce_number(), Some(42.0));
        assert_eq!(FieldValue::from("  ").coerce_number(), Some(0.0));
        assert_eq!(FieldValue::from("abc").coerce_number(), None);
        assert_eq!(FieldValue::Null.coerce_number(), None);
    }

    #[test]
    fn test_from_json() {
        let value = FieldValue::from(serde_json::json!({
            "name": "Asha",
            "experience": 0,
            "tags": ["java", null],
            "manager": null
        }));

        let FieldValue::Object(map) = value else {
            panic!("expected object");
        };
        assert_eq!(map["name"], FieldValue::Text("Asha".to_string()));
        assert_eq!(map["experience"], FieldValue::Number(0.0));
        assert_eq!(
            map["tags"],
            FieldValue::List(vec![FieldValue::Text("java".to_string()), FieldValue::Null])
        );
        assert!(map["manager"].is_null());
    }
}
