//! Loosely-typed CRM records.

use std::collections::BTreeMap;

use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};

use crate::timestamp;
use crate::value::FieldValue;

/// One CRM entity (candidate, lineup, walk-in or joining) as delivered by
/// the backend.
///
/// No schema is enforced. Fields are looked up by name, and a missing field
/// is indistinguishable from an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Top-level field lookup. `null` reads as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// ## Summary
    /// Resolves a dot-separated path such as `recruiter.name`.
    ///
    /// Each segment after the first descends into an [`FieldValue::Object`].
    /// Returns `None` if any segment is missing, `null`, or not an object.
    /// An exact top-level key containing dots wins over path traversal.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&FieldValue> {
        if let Some(value) = self.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                FieldValue::Object(map) => map.get(segment)?,
                _ => return None,
            };
        }

        (!current.is_null()).then_some(current)
    }

    /// ## Summary
    /// Converts the named timestamp fields to [`FieldValue::Date`].
    ///
    /// Meant to run once where records enter the application, so later
    /// comparisons do not depend on string heuristics. Values that do not
    /// parse are left untouched. Returns how many fields were converted.
    pub fn normalize_timestamps(&mut self, names: &[&str], tz: Tz) -> usize {
        let mut converted = 0;
        for name in names {
            let Some(value) = self.fields.get_mut(*name) else {
                continue;
            };
            if matches!(value, FieldValue::Date(_)) {
                continue;
            }
            if let Some(dt) = timestamp::parse_value(value, tz) {
                *value = FieldValue::Date(dt);
                converted += 1;
            }
        }
        converted
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Record {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            fields: map
                .into_iter()
                .map(|(k, v)| (k, FieldValue::from(v)))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Map::<String, serde_json::Value>::deserialize(deserializer).map(Self::from)
    }
}
