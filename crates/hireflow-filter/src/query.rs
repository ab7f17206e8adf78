//! Comma-separated free-text search.

use icu::casemap::CaseMapper;

use crate::record::Record;

/// ## Summary
/// Normalizes text for case-insensitive, whitespace-insensitive matching.
///
/// Uses ICU case folding, so `Straße` and `STRASSE` compare equal, then drops
/// every whitespace character. `"Jane  Doe"` and `"janedoe"` normalize the same.
#[must_use]
pub fn normalize(text: &str) -> String {
    CaseMapper::new()
        .fold_string(text)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// A parsed free-text query.
///
/// Every term must be found in at least one allow-listed field. Different
/// terms may match different fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    terms: Vec<String>,
}

impl FilterQuery {
    /// ## Summary
    /// Splits on commas and normalizes each term. Empty terms are dropped,
    /// so `" , "` yields an empty query that matches everything.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            terms: text
                .split(',')
                .map(normalize)
                .filter(|term| !term.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// ## Summary
    /// Tests a record against this query over the given field paths.
    ///
    /// Absent and `null` fields are skipped. Any other value, including `0`
    /// and `false`, is stringified and searched.
    #[must_use]
    pub fn matches<S: AsRef<str>>(&self, record: &Record, fields: &[S]) -> bool {
        if self.terms.is_empty() {
            return true;
        }

        let haystacks: Vec<String> = fields
            .iter()
            .filter_map(|field| record.resolve(field.as_ref()))
            .filter_map(crate::value::FieldValue::search_text)
            .map(|text| normalize(&text))
            .collect();

        self.terms
            .iter()
            .all(|term| haystacks.iter().any(|hay| hay.contains(term.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_and_normalizes() {
        let query = FilterQuery::parse(" John ,  , DOE  Smith,");
        assert_eq!(query.terms(), ["john".to_string(), "doesmith".to_string()]);
    }

    #[test]
    fn test_parse_blank_is_empty() {
        assert!(FilterQuery::parse("").is_empty());
        assert!(FilterQuery::parse(" , ,").is_empty());
    }

    #[test]
    fn test_unicode_case_folding() {
        assert_eq!(normalize("STRASSE"), normalize("Straße"));
    }

    #[test]
    fn test_terms_are_conjunctive() {
        let john = Record::new().with("name", "John Doe");
        let jane = Record::new().with("name", "Jane Doe");
        let query = FilterQuery::parse("john, doe");

        assert!(query.matches(&john, &["name"]));
        assert!(!query.matches(&jane, &["name"]));
    }

    #[test]
    fn test_fields_are_disjunctive_per_term() {
        let record = Record::new().with("name", "Alpha").with("city", "Mumbai");
        assert!(FilterQuery::parse("mumbai").matches(&record, &["name", "city"]));
        assert!(FilterQuery::parse("alpha, mumbai").matches(&record, &["name", "city"]));
        assert!(!FilterQuery::parse("mumbai").matches(&record, &["name"]));
    }

    #[test]
    fn test_zero_is_searchable() {
        let record = Record::new().with("experience", 0);
        assert!(FilterQuery::parse("0").matches(&record, &["experience"]));
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        let record = Record::new().with("experience", -0.0);
        assert!(FilterQuery::parse("0").matches(&record, &["experience"]));
        assert!(!FilterQuery::parse("-").matches(&record, &["experience"]));
    }

    #[test]
    fn test_whitespace_inside_field_is_ignored() {
        let record = Record::new().with("mobile", "98765 43210");
        assert!(FilterQuery::parse("9876543210").matches(&record, &["mobile"]));
    }

    #[test]
    fn test_fields_outside_allow_list_are_ignored() {
        let record = Record::new().with("notes", "urgent");
        assert!(!FilterQuery::parse("urgent").matches(&record, &["name"]));
    }
}
