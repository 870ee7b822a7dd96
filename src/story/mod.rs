//! Story reference extraction and tracker resolution.

pub mod extract;
pub mod record;
pub mod resolver;
pub mod tracker;

pub use extract::{DEFAULT_PREFIX, ReferenceExtractor, StoryReference};
pub use record::{StoryKind, StoryRecord};
pub use resolver::{Resolution, resolve_stories};
pub use tracker::{DEFAULT_API_URL, ShortcutClient, StoryTracker};
