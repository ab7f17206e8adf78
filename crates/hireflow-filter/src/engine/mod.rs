//! The record filter engine.

use std::fmt::Write as _;

use chrono_tz::Tz;
use hireflow_core::config::Settings;

use crate::allow_list::AllowLists;
use crate::date_range::TruncatedRange;
use crate::error::FilterResult;
use crate::query::FilterQuery;
use crate::record::Record;
use crate::sort::SortKey;
use crate::state::FilterParams;
use crate::timestamp;
use crate::view::{DerivedView, ViewRow};


/// Static configuration of a [`RecordFilterEngine`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Zone for naive timestamps, range truncation and display.
    pub timezone: Tz,
    /// `strftime` pattern for [`ViewRow::display_timestamp`].
    pub display_format: String,
    pub created_field: String,
    pub updated_field: String,
    pub allow_lists: AllowLists,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            display_format: "%d/%m/%Y %I:%M %p".to_string(),
            created_field: "createdAt".to_string(),
            updated_field: "updatedAt".to_string(),
            allow_lists: AllowLists::default(),
        }
    }
}

impl EngineOptions {
    /// ## Summary
    /// Builds engine options from loaded settings.
    ///
    /// ## Errors
    /// Returns an error if the configured time zone is unknown.
    pub fn from_settings(settings: &Settings) -> FilterResult<Self> {
        Ok(Self {
            timezone: settings.display.tz()?,
            display_format: settings.display.format.clone(),
            created_field: settings.fields.created_at.clone(),
            updated_field: settings.fields.updated_at.clone(),
            allow_lists: AllowLists::from_settings(&settings.search),
        })
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    #[must_use]
    pub fn with_allow_lists(mut self, allow_lists: AllowLists) -> Self {
        self.allow_lists = allow_lists;
        self
    }
}

/// ## Summary
/// Derives filtered, sorted views over CRM record lists.
///
/// Holds only immutable options. Every call to [`derive`] is independent:
/// identical inputs give identical output, and the input slice is never
/// modified.
///
/// [`derive`]: RecordFilterEngine::derive
#[derive(Debug, Clone, Default)]
pub struct RecordFilterEngine {
    options: EngineOptions,
}

impl RecordFilterEngine {
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// ## Summary
    /// Applies the free-text slots, the date range and the sort in `params`
    /// to `records`.
    ///
    /// Filters are conjunctive. Sorting is stable, so records with equal keys
    /// keep their input order in either direction. With no sort field the
    /// surviving records keep their input order.
    #[tracing::instrument(skip_all, fields(records = records.len()))]
    pub fn derive<'a>(&self, records: &'a [Record], params: &FilterParams) -> DerivedView<'a> {
        let mut survivors: Vec<(usize, &'a Record)> = records.iter().enumerate().collect();

        for (kind, text) in params.search.active() {
            let query = FilterQuery::parse(text);
            if query.is_empty() {
                continue;
            }
            let fields = self.options.allow_lists.fields(kind);
            survivors.retain(|(_, record)| query.matches(record, fields));
            tracing::debug!(%kind, terms = query.terms().len(), remaining = survivors.len(), "Free-text filter applied");
        }

        if params.date_range.is_active() {
            let granularity = params.granularity();
            match params.date_range.bounds(granularity, self.options.timezone) {
                Some(range) => {
                    survivors.retain(|(_, record)| self.in_range(record, &range));
                }
                None => {
                    tracing::warn!(
                        range = ?params.date_range,
                        %granularity,
                        "Date range bounds could not be resolved, nothing matches"
                    );
                    survivors.clear();
                }
            }
            tracing::debug!(remaining = survivors.len(), "Date range filter applied");
        }

        if params.sort.is_active() {
            let tz = self.options.timezone;
            let order = params.sort.order;
            let mut keyed: Vec<(SortKey, (usize, &'a Record))> = survivors
                .into_iter()
                .map(|survivor| (params.sort.key(survivor.1, tz), survivor))
                .collect();
            keyed.sort_by(|(a, _), (b, _)| order.apply(a.cmp(b)));
            survivors = keyed.into_iter().map(|(_, survivor)| survivor).collect();
            tracing::debug!(sort_by = %params.sort.sort_by, order = %params.sort.order, "Rows sorted");
        }

        DerivedView::new(
            survivors
                .into_iter()
                .map(|(index, record)| ViewRow {
                    index,
                    display_timestamp: self.display_timestamp(record),
                    record,
                })
                .collect(),
        )
    }

    /// True if the created or the updated timestamp lies strictly inside.
    fn in_range(&self, record: &Record, range: &TruncatedRange) -> bool {
        [&self.options.created_field, &self.options.updated_field]
            .into_iter()
            .filter_map(|field| record.resolve(field))
            .filter_map(|value| timestamp::parse_value(value, self.options.timezone))
            .any(|instant| range.contains(instant))
    }

    /// ## Summary
    /// Renders the record's creation time in the configured zone and format.
    ///
    /// Returns an empty string if the field is missing or unparseable, or if
    /// the format pattern is invalid.
    #[must_use]
    pub fn display_timestamp(&self, record: &Record) -> String {
        let Some(created) = record
            .resolve(&self.options.created_field)
            .and_then(|value| timestamp::parse_value(value, self.options.timezone))
        else {
            return String::new();
        };

        let local = created.with_timezone(&self.options.timezone);
        let mut rendered = String::new();
        if write!(rendered, "{}", local.format(&self.options.display_format)).is_err() {
            tracing::warn!(format = %self.options.display_format, "Invalid display format");
            return String::new();
        }
        rendered
    }
}
