//! End-to-end release computation.

use std::sync::Arc;

use semver::Version;
use tracing::{debug, info};

use crate::error::TrackerError;
use crate::story::{
    ReferenceExtractor, Resolution, StoryReference, StoryTracker, resolve_stories,
};

use super::bump::{BumpSeverity, resolve_bump};
use super::notes::{NotesOptions, compose_notes};
use super::version::{next_version, tag_for};

/// The computed release: next version plus rendered notes.
#[derive(Debug, Clone)]
pub struct ReleaseOutcome {
    pub version: Version,
    pub release_notes: String,
    pub severity: BumpSeverity,
    /// References dropped during resolution, kept for diagnostics.
    pub unresolved: Vec<StoryReference>,
}

impl ReleaseOutcome {
    /// The version rendered as a `v`-prefixed tag.
    pub fn tag(&self) -> String {
        tag_for(&self.version)
    }
}

/// Compute the next version and release notes for a commit range.
///
/// Extracts story references, resolves them against the tracker, reduces the
/// story kinds to a bump severity, and renders the notes. Succeeds or fails
/// atomically: individual unresolvable stories are dropped with a warning,
/// while systemic tracker failures abort with no partial result.
///
/// An empty commit range (or one without story references) still produces a
/// valid patch-level release.
pub async fn compute_release<T>(
    tracker: Arc<T>,
    extractor: &ReferenceExtractor,
    commit_messages: &[String],
    previous_version: Option<&Version>,
    notes_options: &NotesOptions,
) -> Result<ReleaseOutcome, TrackerError>
where
    T: StoryTracker + 'static,
{
    if commit_messages.is_empty() {
        info!("Commit range is empty; proceeding with a patch-level release");
    }

    let references = extractor.extract(commit_messages);
    debug!(count = references.len(), "Extracted story references");

    if references.is_empty() && !commit_messages.is_empty() {
        info!("No story references found in commit messages");
    }

    let Resolution { records, unresolved } = resolve_stories(tracker, &references).await?;

    let severity = resolve_bump(&records);
    let version = next_version(previous_version, severity);
    let release_notes = compose_notes(&records, notes_options);

    info!(
        severity = severity.as_str(),
        version = %version,
        stories = records.len(),
        "Computed release"
    );

    Ok(ReleaseOutcome {
        version,
        release_notes,
        severity,
        unresolved,
    })
}
