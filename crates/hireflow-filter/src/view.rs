//! Filtered, ordered output of the engine and its pagination.

use serde::Serialize;

use crate::record::Record;

/// A record that survived filtering, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRow<'a> {
    /// Position of the record in the input slice.
    pub index: usize,
    /// Creation time rendered for the table, or empty if it did not parse.
    pub display_timestamp: String,
    pub record: &'a Record,
}

/// The filtered, ordered output of one engine run.
///
/// Borrows the input records; nothing is copied or mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DerivedView<'a> {
    rows: Vec<ViewRow<'a>>,
}

impl<'a> DerivedView<'a> {
    pub(crate) fn new(rows: Vec<ViewRow<'a>>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn rows(&self) -> &[ViewRow<'a>] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().map(|row| row.record)
    }

    /// Source indices in display order.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.rows.iter().map(|row| row.index).collect()
    }

    /// ## Summary
    /// Rows of zero-based page `page` when split into pages of `page_size`.
    ///
    /// Out-of-range pages and a zero page size give an empty slice.
    #[must_use]
    pub fn page(&self, page: usize, page_size: usize) -> &[ViewRow<'a>] {
        if page_size == 0 {
            return &[];
        }
        let Some(start) = page.checked_mul(page_size).filter(|s| *s < self.rows.len()) else {
            return &[];
        };
        let end = start.saturating_add(page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    #[must_use]
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            0
        } else {
            self.rows.len().div_ceil(page_size)
        }
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<ViewRow<'a>> {
        self.rows
    }
}

impl<'a> IntoIterator for DerivedView<'a> {
    type Item = ViewRow<'a>;
    type IntoIter = std::vec::IntoIter<ViewRow<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
