//! End-to-end engine tests against an in-memory tracker.

mod common;

use std::sync::Arc;

use common::{AuthFailingTracker, InMemoryTracker};
use semver::Version;
use shipnote::error::TrackerError;
use shipnote::release::{BumpSeverity, NotesOptions, compute_release};
use shipnote::story::ReferenceExtractor;

fn messages(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn extractor() -> ReferenceExtractor {
    ReferenceExtractor::new("SC").unwrap()
}

#[tokio::test]
async fn test_round_trip_scenario() {
    let tracker = Arc::new(
        InMemoryTracker::new()
            .with_story(10, "Fix crash", "bug")
            .with_story(11, "Add export", "feature"),
    );
    let previous = Version::new(1, 2, 3);

    let outcome = compute_release(
        tracker,
        &extractor(),
        &messages(&["fix: SC-10 done", "feat SC-11 shipped"]),
        Some(&previous),
        &NotesOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.severity, BumpSeverity::Minor);
    assert_eq!(outcome.version, Version::new(1, 3, 0));
    assert_eq!(outcome.tag(), "v1.3.0");
    assert!(outcome.unresolved.is_empty());

    assert!(outcome.release_notes.contains("## 🚀 Features"));
    assert!(outcome.release_notes.contains("- Add export (SC-11)"));
    assert!(outcome.release_notes.contains("## 🐛 Bug Fixes"));
    assert!(outcome.release_notes.contains("- Fix crash (SC-10)"));
}

#[tokio::test]
async fn test_partial_resolution_still_succeeds() {
    let tracker = Arc::new(InMemoryTracker::new().with_story(10, "Fix crash", "bug"));
    let previous = Version::new(1, 2, 3);

    let outcome = compute_release(
        tracker,
        &extractor(),
        &messages(&["fix: SC-10 done", "feat SC-99 shipped"]),
        Some(&previous),
        &NotesOptions::default(),
    )
    .await
    .unwrap();

    // Only the resolved bug story counts, so this is a patch release.
    assert_eq!(outcome.severity, BumpSeverity::Patch);
    assert_eq!(outcome.version, Version::new(1, 2, 4));
    assert!(outcome.release_notes.contains("Fix crash"));
    assert!(!outcome.release_notes.contains("SC-99"));

    assert_eq!(outcome.unresolved.len(), 1);
    assert_eq!(outcome.unresolved[0].id(), "SC-99");
}

#[tokio::test]
async fn test_no_previous_version_bumps_from_zero() {
    let tracker = Arc::new(InMemoryTracker::new().with_story(11, "Add export", "feature"));

    let outcome = compute_release(
        tracker,
        &extractor(),
        &messages(&["feat SC-11 shipped"]),
        None,
        &NotesOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.version, Version::new(0, 1, 0));
}

#[tokio::test]
async fn test_empty_commit_range_yields_patch_release() {
    let tracker = Arc::new(InMemoryTracker::new());
    let previous = Version::new(1, 2, 3);

    let outcome = compute_release(
        tracker,
        &extractor(),
        &[],
        Some(&previous),
        &NotesOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.severity, BumpSeverity::Patch);
    assert_eq!(outcome.version, Version::new(1, 2, 4));
    assert_eq!(outcome.release_notes, "");
}

#[tokio::test]
async fn test_commits_without_references_yield_patch_release() {
    let tracker = Arc::new(InMemoryTracker::new());

    let outcome = compute_release(
        tracker,
        &extractor(),
        &messages(&["chore: tidy build scripts"]),
        Some(&Version::new(0, 9, 0)),
        &NotesOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.version, Version::new(0, 9, 1));
    assert_eq!(outcome.release_notes, "");
}

#[tokio::test]
async fn test_auth_failure_aborts_without_partial_result() {
    let tracker = Arc::new(AuthFailingTracker);

    let result = compute_release(
        tracker,
        &extractor(),
        &messages(&["fix: SC-10 done"]),
        Some(&Version::new(1, 0, 0)),
        &NotesOptions::default(),
    )
    .await;

    assert!(matches!(result, Err(TrackerError::AuthFailed { .. })));
}

#[tokio::test]
async fn test_notes_are_byte_identical_across_runs() {
    let commits = messages(&["feat SC-11 shipped", "fix: SC-10 done", "chore sc-12 deps"]);
    let options = NotesOptions {
        prefix: Some("Weekly release".to_string()),
        include_story_links: true,
    };

    let mut rendered = Vec::new();
    for _ in 0..2 {
        let tracker = Arc::new(
            InMemoryTracker::new()
                .with_story(10, "Fix crash", "bug")
                .with_story(11, "Add export", "feature")
                .with_story(12, "Bump deps", "chore"),
        );
        let outcome = compute_release(
            tracker,
            &extractor(),
            &commits,
            Some(&Version::new(2, 0, 0)),
            &options,
        )
        .await
        .unwrap();
        rendered.push(outcome.release_notes);
    }

    assert_eq!(rendered[0], rendered[1]);
    assert!(rendered[0].starts_with("Weekly release\n\n"));
}

#[tokio::test]
async fn test_unknown_story_kind_lands_in_chores() {
    let tracker = Arc::new(InMemoryTracker::new().with_story(7, "Research spike", "epic"));

    let outcome = compute_release(
        tracker,
        &extractor(),
        &messages(&["SC-7 investigation"]),
        Some(&Version::new(1, 0, 0)),
        &NotesOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.severity, BumpSeverity::Patch);
    assert!(outcome.release_notes.contains("## 🔧 Chores"));
    assert!(outcome.release_notes.contains("- Research spike (SC-7)"));
}
