//! Version-bump severity resolution from story kinds.

use crate::story::{StoryKind, StoryRecord};

/// Magnitude of a semantic version increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BumpSeverity {
    Patch,
    Minor,
    Major,
}

impl BumpSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

/// Classification table mapping story kinds to bump severities.
///
/// Kinds absent from the table default to `Patch`.
pub const CLASSIFICATION: &[(StoryKind, BumpSeverity)] = &[
    (StoryKind::Feature, BumpSeverity::Minor),
    (StoryKind::Bug, BumpSeverity::Patch),
    (StoryKind::Chore, BumpSeverity::Patch),
];

/// Look up the severity for a single story kind.
pub fn severity_for(kind: StoryKind) -> BumpSeverity {
    CLASSIFICATION
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, severity)| *severity)
        .unwrap_or(BumpSeverity::Patch)
}

/// Reduce resolved stories to a single severity.
///
/// Takes the maximum over the total order `patch < minor < major`. An empty
/// set yields `Patch` so a release without resolvable stories still ships.
pub fn resolve_bump(records: &[StoryRecord]) -> BumpSeverity {
    records
        .iter()
        .map(|record| severity_for(record.kind))
        .max()
        .unwrap_or(BumpSeverity::Patch)
}
