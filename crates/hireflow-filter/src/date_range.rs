//! Created/updated date range filter.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::error::{FilterError, FilterResult};
use crate::timestamp;

/// Granularity the range bounds are truncated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRangeType {
    #[default]
    Day,
    Month,
    Year,
}

impl DateRangeType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// First day of the period containing `date`.
    #[must_use]
    pub fn period_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Day => Some(date),
            Self::Month => date.with_day(1),
            Self::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        }
        .unwrap_or(date)
    }

    /// First day of the period after the one containing `date`.
    #[must_use]
    pub fn next_period_start(self, date: NaiveDate) -> Option<NaiveDate> {
        let start = self.period_start(date);
        match self {
            Self::Day => start.succ_opt(),
            Self::Month => start.checked_add_months(Months::new(1)),
            Self::Year => start.checked_add_months(Months::new(12)),
        }
    }

    /// ## Summary
    /// Parses an optional granularity where an empty string means "unset".
    ///
    /// ## Errors
    /// Returns `FilterError::UnknownGranularity` for anything other than
    /// `day`, `month`, `year` or blank.
    pub fn parse_optional(text: &str) -> FilterResult<Option<Self>> {
        if text.trim().is_empty() {
            Ok(None)
        } else {
            text.parse().map(Some)
        }
    }
}

impl std::fmt::Display for DateRangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRangeType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(FilterError::UnknownGranularity(other.to_string())),
        }
    }
}

/// Calendar-date bounds picked by the user. Inactive unless both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// ## Summary
    /// Truncates the bounds to `granularity` in `tz`.
    ///
    /// The start becomes the first instant of its period and the end the last
    /// millisecond of its period. Returns `None` when the range is inactive or
    /// a bound cannot be placed in the zone.
    #[must_use]
    pub fn bounds(&self, granularity: DateRangeType, tz: Tz) -> Option<TruncatedRange> {
        let (start, end) = (self.start?, self.end?);

        let start = midnight(granularity.period_start(start))?;
        let end = midnight(granularity.next_period_start(end)?)?;

        Some(TruncatedRange {
            start: timestamp::localize(&start, tz)?,
            end: timestamp::localize(&end, tz)? - TimeDelta::milliseconds(1),
        })
    }
}

/// ## Summary
/// Parses a range bound from `YYYY-MM-DD`, optionally followed by a time
/// which is ignored since bounds are truncated to at least a day.
///
/// ## Errors
/// Returns `FilterError::InvalidDate` if no date can be read.
pub fn parse_bound(text: &str) -> FilterResult<NaiveDate> {
    let text = text.trim();
    let date_part = text.split(['T', ' ']).next().unwrap_or(text);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| FilterError::InvalidDate(format!("{text}: {e}")))
}

fn midnight(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)
}

/// Range bounds resolved to instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncatedRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TruncatedRange {
    /// Strictly after the start and strictly before the end.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant > self.start && instant < self.end
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Asia;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_inactive_without_both_bounds() {
        let range = DateRange {
            start: Some(date(2024, 1, 1)),
            end: None,
        };
        assert!(!range.is_active());
        assert!(range.bounds(DateRangeType::Day, Tz::UTC).is_none());
    }

    #[test]
    fn test_day_bounds() {
        let bounds = DateRange::new(date(2024, 1, 1), date(2024, 1, 31))
            .bounds(DateRangeType::Day, Tz::UTC)
            .unwrap();

        assert_eq!(bounds.start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            bounds.end,
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap() - TimeDelta::milliseconds(1)
        );
    }

    #[test]
    fn test_month_and_year_bounds() {
        let range = DateRange::new(date(2024, 2, 15), date(2024, 2, 20));

        let month = range.bounds(DateRangeType::Month, Tz::UTC).unwrap();
        assert_eq!(month.start, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(
            month.end,
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap() - TimeDelta::milliseconds(1)
        );

        let year = range.bounds(DateRangeType::Year, Tz::UTC).unwrap();
        assert_eq!(year.start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            year.end,
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() - TimeDelta::milliseconds(1)
        );
    }

    #[test]
    fn test_bounds_follow_zone() {
        let bounds = DateRange::new(date(2024, 1, 1), date(2024, 1, 1))
            .bounds(DateRangeType::Day, Asia::Kolkata)
            .unwrap();
        assert_eq!(bounds.start, Utc.with_ymd_and_hms(2023, 12, 31, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_contains_is_exclusive() {
        let bounds = DateRange::new(date(2024, 1, 1), date(2024, 1, 31))
            .bounds(DateRangeType::Day, Tz::UTC)
            .unwrap();

        assert!(!bounds.contains(bounds.start));
        assert!(bounds.contains(bounds.start + TimeDelta::seconds(1)));
        assert!(!bounds.contains(bounds.end));
        assert!(bounds.contains(bounds.end - TimeDelta::milliseconds(1)));
    }

    #[test]
    fn test_parse_granularity() {
        assert_eq!("Month".parse::<DateRangeType>().unwrap(), DateRangeType::Month);
        assert_eq!(DateRangeType::parse_optional("").unwrap(), None);
        assert!(matches!(
            "week".parse::<DateRangeType>(),
            Err(FilterError::UnknownGranularity(g)) if g == "week"
        ));
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound("2024-01-31").unwrap(), date(2024, 1, 31));
        assert_eq!(parse_bound("2024-01-31T23:00:00").unwrap(), date(2024, 1, 31));
        assert!(matches!(parse_bound("31/01/2024"), Err(FilterError::InvalidDate(_))));
    }
}
