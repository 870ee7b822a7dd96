//! shipnote - computes a semantic-version bump and release notes from tracker stories.
//!
//! # Overview
//!
//! shipnote scans a git commit range for story identifiers (e.g. `SC-123`),
//! resolves each one against the Shortcut tracker, derives the next semantic
//! version from the story kinds, and renders release notes grouped by kind.
//! The result is printed as JSON for CI consumption and can optionally be
//! published as a GitHub release.

pub mod error;
pub mod git;
pub mod github;
pub mod release;
pub mod story;

// Re-export commonly used types
pub use error::{ExtractError, GitError, PublishError, TrackerError, VersionError};
pub use release::{BumpSeverity, NotesOptions, ReleaseOutcome};
pub use story::{ReferenceExtractor, StoryKind, StoryRecord, StoryReference};
