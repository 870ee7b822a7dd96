//! Story reference extraction from commit messages.

use std::collections::HashSet;
use std::fmt;

use regex_lite::Regex;
use tracing::debug;

use crate::error::ExtractError;

/// Default identifier prefix for Shortcut stories.
pub const DEFAULT_PREFIX: &str = "SC";

/// A work-item identifier referenced from a commit message.
///
/// The canonical form is the uppercased prefix, a hyphen, and the numeric
/// suffix as written (`SC-123`), regardless of how the commit spelled it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoryReference {
    canonical: String,
    number: u64,
}

impl StoryReference {
    /// Build a reference from its parts. Extraction is the usual producer;
    /// this is for callers that already hold an identifier.
    pub fn new(prefix: &str, number: u64) -> Self {
        Self {
            canonical: format!("{}-{}", prefix.to_ascii_uppercase(), number),
            number,
        }
    }

    /// The canonical identifier, e.g. `SC-123`.
    pub fn id(&self) -> &str {
        &self.canonical
    }

    /// The numeric suffix, used as the tracker's story id.
    pub fn number(&self) -> u64 {
        self.number
    }
}

impl fmt::Display for StoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Matches story identifiers in commit text.
pub struct ReferenceExtractor {
    pattern: Regex,
    prefix: String,
}

impl ReferenceExtractor {
    /// Build an extractor for the given identifier prefix.
    ///
    /// The matching rule is `(?i)\b{prefix}-([0-9]+)\b`: the prefix matches
    /// case-insensitively at a word boundary, the hyphen is mandatory, and
    /// the numeric suffix must end at a word boundary. Near-misses such as
    /// `SC123` or `SC-` are not extracted, and neither is `RSC-12`.
    pub fn new(prefix: &str) -> Result<Self, ExtractError> {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ExtractError::InvalidPrefix(prefix.to_string()));
        }

        // The prefix is plain alphanumeric, so the pattern always parses.
        let pattern = Regex::new(&format!(r"(?i)\b{}-([0-9]+)\b", prefix)).unwrap();

        Ok(Self {
            pattern,
            prefix: prefix.to_ascii_uppercase(),
        })
    }

    /// Scan commit messages and return unique references in first-seen order.
    ///
    /// A message with several identifiers contributes all of them left to
    /// right; repeats across the range keep only their first position.
    pub fn extract(&self, messages: &[String]) -> Vec<StoryReference> {
        let mut seen = HashSet::new();
        let mut references = Vec::new();

        for message in messages {
            for captures in self.pattern.captures_iter(message) {
                let digits = match captures.get(1) {
                    Some(m) => m.as_str(),
                    None => continue,
                };

                let number: u64 = match digits.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        debug!(digits, "Skipping story reference with oversized suffix");
                        continue;
                    }
                };

                let canonical = format!("{}-{}", self.prefix, digits);
                if seen.insert(canonical.clone()) {
                    references.push(StoryReference { canonical, number });
                }
            }
        }

        references
    }
}
