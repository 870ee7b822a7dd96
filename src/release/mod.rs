//! Release computation: bump resolution, version calculation, notes.

pub mod bump;
pub mod engine;
pub mod notes;
pub mod version;

pub use bump::{BumpSeverity, CLASSIFICATION, resolve_bump, severity_for};
pub use engine::{ReleaseOutcome, compute_release};
pub use notes::{NotesOptions, compose_notes};
pub use version::{next_version, parse_version, tag_for};
