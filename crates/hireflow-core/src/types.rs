use std::str::FromStr;

use crate::error::CoreError;

/// The CRM entity a list view is showing.
///
/// Each kind carries its own free-text search slot and allow-list of
/// searchable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Candidate,
    Lineup,
    WalkIn,
    Joining,
}

impl RecordKind {
    pub const ALL: [Self; 4] = [Self::Candidate, Self::Lineup, Self::WalkIn, Self::Joining];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Candidate => "candidate",
            Self::Lineup => "lineup",
            Self::WalkIn => "walkin",
            Self::Joining => "joining",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "candidate" | "candidates" => Ok(Self::Candidate),
            "lineup" | "lineups" => Ok(Self::Lineup),
            "walkin" | "walk-in" | "walkins" | "walk-ins" => Ok(Self::WalkIn),
            "joining" | "joinings" => Ok(Self::Joining),
            other => Err(CoreError::InvalidInput(format!("unknown record kind: {other}"))),
        }
    }
}
