//! Single-field ordering of records.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use icu::casemap::CaseMapper;
use regex_lite::Regex;

use crate::error::FilterError;
use crate::record::Record;
use crate::timestamp;
use crate::value::FieldValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Applies this order to an ascending comparison result.
    #[must_use]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(FilterError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// Field path to sort on plus direction. An empty path means "keep order".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub sort_by: String,
    pub order: SortOrder,
}

impl SortSpec {
    #[must_use]
    pub fn new(sort_by: impl Into<String>, order: SortOrder) -> Self {
        Self {
            sort_by: sort_by.into(),
            order,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.sort_by.trim().is_empty()
    }

    /// ## Summary
    /// Compares two records on the sort field.
    ///
    /// The direction is applied on top of [`compare_values`], so absent
    /// values come first when ascending and last when descending.
    #[must_use]
    pub fn compare(&self, a: &Record, b: &Record, tz: Tz) -> Ordering {
        self.order.apply(self.key(a, tz).cmp(&self.key(b, tz)))
    }

    /// Ascending sort key of `record` on the sort field.
    #[must_use]
    pub fn key(&self, record: &Record, tz: Tz) -> SortKey {
        SortKey::of(record.resolve(self.sort_by.trim()), tz)
    }
}

/// Leading decimal number, as a browser's `parseFloat` would read it.
static FLOAT_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?")
        .inspect_err(|e| tracing::error!(error = %e, "Invalid float prefix pattern"))
        .ok()
});

/// ## Summary
/// Reads the leading number of a string, ignoring anything after it.
///
/// `"12 years"` reads as `12`, `"  -3.5k"` as `-3.5`. Text that does not start
/// with a number (after leading whitespace) yields `None`.
#[must_use]
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let re = FLOAT_PREFIX.as_ref()?;
    re.find(text).and_then(|m| m.as_str().parse::<f64>().ok())
}

fn fold(text: &str) -> String {
    CaseMapper::new().fold_string(text).into_owned()
}

/// Sort key extracted once per record.
///
/// Keys are totally ordered. Values fall into classes ranked
/// absent < date < number < text < other, and compare within their class:
/// dates as instants, numbers (including booleans and text with a leading
/// number) numerically, text case-insensitively. Everything in the last
/// class, such as lists and objects, ranks equal.
#[derive(Debug, Clone)]
pub enum SortKey {
    Absent,
    Date(DateTime<Utc>),
    Number(f64),
    Text(String),
    Other,
}

impl SortKey {
    #[must_use]
    pub fn of(value: Option<&FieldValue>, tz: Tz) -> Self {
        let Some(value) = value else {
            return Self::Absent;
        };
        if let Some(instant) = timestamp::sort_date(value, tz) {
            return Self::Date(instant);
        }
        match value {
            FieldValue::Null => Self::Absent,
            FieldValue::Text(text) => {
                parse_float_prefix(text).map_or_else(|| Self::Text(fold(text)), Self::number)
            }
            FieldValue::Number(_) | FieldValue::Bool(_) => {
                value.coerce_number().map_or(Self::Other, Self::number)
            }
            FieldValue::Date(_) | FieldValue::List(_) | FieldValue::Object(_) => Self::Other,
        }
    }

    // -0 and 0 tie.
    fn number(n: f64) -> Self {
        Self::Number(if n == 0.0 { 0.0 } else { n })
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Date(_) => 1,
            Self::Number(_) => 2,
            Self::Text(_) => 3,
            Self::Other => 4,
        }
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// ## Summary
/// Ascending comparison of two optional field values.
///
/// Absent values sort first. See [`SortKey`] for how present values rank.
#[must_use]
pub fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>, tz: Tz) -> Ordering {
    SortKey::of(a, tz).cmp(&SortKey::of(b, tz))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(a: impl Into<FieldValue>, b: impl Into<FieldValue>) -> Ordering {
        compare_values(Some(&a.into()), Some(&b.into()), Tz::UTC)
    }

    #[test]
    fn test_absent_is_minimal() {
        let present = FieldValue::from("a");
        assert_eq!(compare_values(None, Some(&present), Tz::UTC), Ordering::Less);
        assert_eq!(compare_values(Some(&present), None, Tz::UTC), Ordering::Greater);
        assert_eq!(compare_values(None, None, Tz::UTC), Ordering::Equal);
    }

    #[test]
    fn test_dates_compare_chronologically() {
        // Day-first strings would sort wrongly as plain text.
        assert_eq!(cmp("02/01/2024", "10/12/2023"), Ordering::Greater);
        assert_eq!(cmp("2024-01-02", "02/01/2024"), Ordering::Equal);
    }

    #[test]
    fn test_numeric_strings_compare_as_numbers() {
        assert_eq!(cmp("7000", "50000"), Ordering::Less);
        assert_eq!(cmp("12 years", "5 years"), Ordering::Greater);
    }

    #[test]
    fn test_text_is_case_insensitive() {
        assert_eq!(cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(cmp("PUNE", "pune"), Ordering::Equal);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(cmp(2.5, 10), Ordering::Less);
        assert_eq!(cmp(-0.0, 0), Ordering::Equal);
        assert_eq!(cmp(f64::NAN, 1), Ordering::Greater);
    }

    #[test]
    fn test_mixed_types_rank_by_class() {
        assert_eq!(cmp(true, 0), Ordering::Greater);
        assert_eq!(cmp(5, "40"), Ordering::Less);
        assert_eq!(cmp(5, "Pune"), Ordering::Less);
        assert_eq!(cmp("2024-01-02", 1), Ordering::Less);
        assert_eq!(cmp("Pune", FieldValue::List(vec![1.into()])), Ordering::Less);
        assert_eq!(
            compare_values(Some(&FieldValue::Null), None, Tz::UTC),
            Ordering::Equal
        );
    }

    #[test]
    fn test_dates_and_leading_numbers_do_not_cycle() {
        // As dates 01/06/2024 > 2024-01-01, and by leading number
        // 2024-01-01 would beat 50 while 50 would beat 01/06/2024.
        assert_eq!(cmp("01/06/2024", "2024-01-01"), Ordering::Greater);
        assert_eq!(cmp("2024-01-01", "50"), Ordering::Less);
        assert_eq!(cmp("01/06/2024", "50"), Ordering::Less);
    }

    #[test]
    fn test_mixed_column_is_totally_ordered() {
        let pool: Vec<FieldValue> = vec![
            5.into(),
            "40".into(),
            "Pune".into(),
            "Fresher".into(),
            1.into(),
            "2024-01-02".into(),
            "12 years".into(),
            true.into(),
            "abc".into(),
            "01/06/2024".into(),
            "2024-01-01".into(),
            "50".into(),
            "15/03/2023".into(),
            "".into(),
            FieldValue::Null,
            (-0.0).into(),
            FieldValue::List(vec!["x".into()]),
        ];
        let keys: Vec<SortKey> = pool.iter().map(|v| SortKey::of(Some(v), Tz::UTC)).collect();

        for a in &keys {
            assert_eq!(a.cmp(a), Ordering::Equal);
            for b in &keys {
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
                for c in &keys {
                    if a <= b && b <= c {
                        assert!(a <= c, "{a:?} <= {b:?} <= {c:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("  -3.5k"), Some(-3.5));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("1e3 rupees"), Some(1000.0));
        assert_eq!(parse_float_prefix("Pune"), None);
        assert_eq!(parse_float_prefix(""), None);
    }

    #[test]
    fn test_order_parsing_and_flip() {
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert_eq!(SortOrder::Asc.flipped(), SortOrder::Desc);
        assert!(matches!(
            "up".parse::<SortOrder>(),
            Err(FilterError::UnknownSortOrder(o)) if o == "up"
        ));
    }

    #[test]
    fn test_sort_spec_applies_direction() {
        let sort = SortSpec::new("ctc", SortOrder::Desc);
        let low = Record::new().with("ctc", 3);
        let high = Record::new().with("ctc", 9);
        let none = Record::new();

        assert_eq!(sort.compare(&high, &low, Tz::UTC), Ordering::Less);
        assert_eq!(sort.compare(&none, &low, Tz::UTC), Ordering::Greater);
        assert!(!SortSpec::default().is_active());
    }
}
