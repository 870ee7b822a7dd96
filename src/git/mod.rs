//! Git operations using git2-rs.

pub mod commits;
pub mod range;
pub mod tags;

pub use commits::collect_messages;
pub use range::{ReleaseRange, resolve_range};
pub use tags::{VersionTag, latest_version_tag, version_from_tag, version_tag_at_head};
