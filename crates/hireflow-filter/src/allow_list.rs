//! Searchable fields per record kind.

use hireflow_core::config::SearchConfig;
use hireflow_core::types::RecordKind;

const CANDIDATE_FIELDS: &[&str] = &[
    "name",
    "email",
    "mobile",
    "alternateMobile",
    "city",
    "qualification",
    "experience",
    "currentCompany",
    "designation",
    "skills",
    "source",
    "status",
    "recruiter.name",
];

const LINEUP_FIELDS: &[&str] = &[
    "candidateName",
    "candidate.name",
    "email",
    "mobile",
    "companyName",
    "position",
    "location",
    "interviewRound",
    "status",
    "recruiter.name",
];

const WALKIN_FIELDS: &[&str] = &[
    "name",
    "email",
    "mobile",
    "city",
    "purpose",
    "referredBy",
    "status",
    "interviewer.name",
];

const JOINING_FIELDS: &[&str] = &[
    "candidateName",
    "candidate.name",
    "email",
    "mobile",
    "companyName",
    "designation",
    "location",
    "ctc",
    "status",
    "recruiter.name",
];

/// Field paths the free-text search looks at, one list per [`RecordKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowLists {
    candidate: Vec<String>,
    lineup: Vec<String>,
    walkin: Vec<String>,
    joining: Vec<String>,
}

impl Default for AllowLists {
    fn default() -> Self {
        fn owned(fields: &[&str]) -> Vec<String> {
            fields.iter().map(|f| (*f).to_string()).collect()
        }

        Self {
            candidate: owned(CANDIDATE_FIELDS),
            lineup: owned(LINEUP_FIELDS),
            walkin: owned(WALKIN_FIELDS),
            joining: owned(JOINING_FIELDS),
        }
    }
}

impl AllowLists {
    /// Built-in lists with any per-kind overrides from settings applied.
    #[must_use]
    pub fn from_settings(search: &SearchConfig) -> Self {
        let mut lists = Self::default();
        for kind in RecordKind::ALL {
            if let Some(fields) = search.fields_for(kind) {
                lists.set(kind, fields.iter().cloned());
            }
        }
        lists
    }

    #[must_use]
    pub fn fields(&self, kind: RecordKind) -> &[String] {
        match kind {
            RecordKind::Candidate => &self.candidate,
            RecordKind::Lineup => &self.lineup,
            RecordKind::WalkIn => &self.walkin,
            RecordKind::Joining => &self.joining,
        }
    }

    /// Replaces the list for `kind`. Blank entries are dropped.
    pub fn set(&mut self, kind: RecordKind, fields: impl IntoIterator<Item = String>) {
        let fields = fields
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        match kind {
            RecordKind::Candidate => self.candidate = fields,
            RecordKind::Lineup => self.lineup = fields,
            RecordKind::WalkIn => self.walkin = fields,
            RecordKind::Joining => self.joining = fields,
        }
    }

    #[must_use]
    pub fn with(mut self, kind: RecordKind, fields: &[&str]) -> Self {
        self.set(kind, fields.iter().map(|f| (*f).to_string()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_distinct_per_kind() {
        let lists = AllowLists::default();
        assert!(lists.fields(RecordKind::Candidate).contains(&"city".to_string()));
        assert!(lists.fields(RecordKind::Lineup).contains(&"companyName".to_string()));
        assert!(!lists.fields(RecordKind::Candidate).contains(&"companyName".to_string()));
        assert!(lists.fields(RecordKind::Joining).contains(&"ctc".to_string()));
        assert!(lists.fields(RecordKind::WalkIn).contains(&"purpose".to_string()));
    }

    #[test]
    fn test_settings_override_one_kind() {
        let search = SearchConfig {
            lineup: Some(vec![" clientName ".to_string(), String::new()]),
            ..SearchConfig::default()
        };
        let lists = AllowLists::from_settings(&search);

        assert_eq!(lists.fields(RecordKind::Lineup), ["clientName".to_string()]);
        assert_eq!(
            lists.fields(RecordKind::Candidate),
            AllowLists::default().fields(RecordKind::Candidate)
        );
    }
}
