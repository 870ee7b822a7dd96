//! Resolved story metadata.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Story kinds recognized by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryKind {
    Feature,
    Bug,
    Chore,
}

impl StoryKind {
    /// Classify a tracker `story_type` string.
    ///
    /// Unknown kinds fold into `Chore`, the lowest-severity bucket, so a new
    /// tracker-side kind never fails a release.
    pub fn classify(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "feature" => Self::Feature,
            "bug" => Self::Bug,
            "chore" => Self::Chore,
            other => {
                debug!(kind = other, "Unknown story kind, treating as chore");
                Self::Chore
            }
        }
    }
}

/// Resolved metadata for one story reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryRecord {
    pub id: String,
    pub title: String,
    pub kind: StoryKind,
}
