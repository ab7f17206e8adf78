//! Caller-owned query parameters.
//!
//! [`FilterParams`] is the immutable input handed to the engine.
//! [`FilterState`] wraps it with the setters a list screen wires to its
//! search boxes, date pickers and column headers.

use chrono::NaiveDate;
use hireflow_core::types::RecordKind;

use crate::date_range::{DateRange, DateRangeType};
use crate::sort::{SortOrder, SortSpec};

/// One free-text slot per record kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSlots {
    pub candidate: String,
    pub lineup: String,
    pub walkin: String,
    pub joining: String,
}

impl SearchSlots {
    #[must_use]
    pub fn get(&self, kind: RecordKind) -> &str {
        match kind {
            RecordKind::Candidate => &self.candidate,
            RecordKind::Lineup => &self.lineup,
            RecordKind::WalkIn => &self.walkin,
            RecordKind::Joining => &self.joining,
        }
    }

    fn slot_mut(&mut self, kind: RecordKind) -> &mut String {
        match kind {
            RecordKind::Candidate => &mut self.candidate,
            RecordKind::Lineup => &mut self.lineup,
            RecordKind::WalkIn => &mut self.walkin,
            RecordKind::Joining => &mut self.joining,
        }
    }

    /// Populated slots in a fixed order.
    pub fn active(&self) -> impl Iterator<Item = (RecordKind, &str)> {
        RecordKind::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|(_, text)| !text.trim().is_empty())
    }
}

/// Everything the engine needs to derive a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterParams {
    pub search: SearchSlots,
    pub date_range: DateRange,
    /// `None` truncates by day.
    pub date_range_type: Option<DateRangeType>,
    pub sort: SortSpec,
}

impl FilterParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, kind: RecordKind, text: impl Into<String>) -> Self {
        *self.search.slot_mut(kind) = text.into();
        self
    }

    #[must_use]
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = DateRange::new(start, end);
        self
    }

    #[must_use]
    pub fn with_date_range_type(mut self, granularity: DateRangeType) -> Self {
        self.date_range_type = Some(granularity);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort = SortSpec::new(sort_by, order);
        self
    }

    #[must_use]
    pub fn granularity(&self) -> DateRangeType {
        self.date_range_type.unwrap_or_default()
    }
}

/// ## Summary
/// Mutable query state for one list screen.
///
/// Every setter that actually changes a parameter bumps [`revision`], so a
/// caller rendering asynchronously can drop results computed for an older
/// revision.
///
/// [`revision`]: FilterState::revision
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    params: FilterParams,
    revision: u64,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn update<T: PartialEq>(revision: &mut u64, slot: &mut T, value: T) {
        if *slot != value {
            *slot = value;
            *revision += 1;
        }
    }

    #[must_use]
    pub fn free_text(&self, kind: RecordKind) -> &str {
        self.params.search.get(kind)
    }

    pub fn set_free_text(&mut self, kind: RecordKind, text: impl Into<String>) {
        Self::update(&mut self.revision, self.params.search.slot_mut(kind), text.into());
    }

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        Self::update(
            &mut self.revision,
            &mut self.params.date_range,
            DateRange { start, end },
        );
    }

    pub fn clear_date_range(&mut self) {
        self.set_date_range(None, None);
    }

    pub fn set_date_range_type(&mut self, granularity: Option<DateRangeType>) {
        Self::update(&mut self.revision, &mut self.params.date_range_type, granularity);
    }

    pub fn set_sort_by(&mut self, field: impl Into<String>) {
        Self::update(&mut self.revision, &mut self.params.sort.sort_by, field.into());
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        Self::update(&mut self.revision, &mut self.params.sort.order, order);
    }

    /// ## Summary
    /// Column-header click: the same field flips the direction, a different
    /// field starts ascending.
    pub fn toggle_sort(&mut self, field: impl Into<String>) {
        let field = field.into();
        let next = if self.params.sort.sort_by == field {
            SortSpec::new(field, self.params.sort.order.flipped())
        } else {
            SortSpec::new(field, SortOrder::Asc)
        };
        Self::update(&mut self.revision, &mut self.params.sort, next);
    }

    /// Clears every parameter.
    pub fn reset(&mut self) {
        Self::update(&mut self.revision, &mut self.params, FilterParams::default());
    }
}
