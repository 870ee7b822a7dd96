//! Release notes rendering.

use crate::story::{StoryKind, StoryRecord};

/// Options controlling notes rendering.
#[derive(Debug, Clone, Default)]
pub struct NotesOptions {
    /// Text emitted verbatim before the generated groups.
    pub prefix: Option<String>,
    /// Render story titles as links back to the tracker.
    pub include_story_links: bool,
}

/// Kind groups in display order.
const GROUPS: &[(StoryKind, &str)] = &[
    (StoryKind::Feature, "🚀 Features"),
    (StoryKind::Bug, "🐛 Bug Fixes"),
    (StoryKind::Chore, "🔧 Chores"),
];

/// Render release notes grouped by story kind.
///
/// Stories keep the order they were first referenced in the commit range.
/// This is pure text formatting; identical inputs reproduce the output byte
/// for byte, which callers depend on for diffing and caching.
pub fn compose_notes(records: &[StoryRecord], options: &NotesOptions) -> String {
    let mut sections = Vec::new();

    for (kind, heading) in GROUPS {
        let entries: Vec<&StoryRecord> = records.iter().filter(|r| r.kind == *kind).collect();
        if entries.is_empty() {
            continue;
        }

        let mut section = format!("## {}\n", heading);
        for record in entries {
            section.push_str(&render_entry(record, options.include_story_links));
        }
        sections.push(section.trim_end().to_string());
    }

    let body = sections.join("\n\n");

    match options.prefix.as_deref() {
        Some(prefix) if !prefix.is_empty() => {
            if body.is_empty() {
                prefix.to_string()
            } else {
                format!("{}\n\n{}", prefix, body)
            }
        }
        _ => body,
    }
}

/// One story line: title plus identifier for traceability back to the tracker.
fn render_entry(record: &StoryRecord, link: bool) -> String {
    if link {
        format!(
            "- [{}](https://app.shortcut.com/story/{}) ({})\n",
            record.title,
            record.id.to_lowercase(),
            record.id
        )
    } else {
        format!("- {} ({})\n", record.title, record.id)
    }
}
