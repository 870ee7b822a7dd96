//! Shared test utilities for integration tests.
//!
//! Not all helpers are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use git2::{Oid, Repository, Signature};
use shipnote::error::TrackerError;
use shipnote::story::{StoryKind, StoryRecord, StoryReference, StoryTracker};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Create a commit with the given message. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        let sig = self.signature();

        // Touch a file so every commit has a distinct tree.
        let file_path = self.dir.path().join("test.txt");
        let content = format!(
            "{}\n{}",
            message,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        );
        std::fs::write(&file_path, content).expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_path(std::path::Path::new("test.txt"))
            .expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self
            .repo
            .find_object(oid, None)
            .expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }
}

/// An in-memory tracker keyed by story number.
pub struct InMemoryTracker {
    stories: HashMap<u64, (String, String)>,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self {
            stories: HashMap::new(),
        }
    }

    /// Register a story with a title and a raw `story_type` string.
    pub fn with_story(mut self, number: u64, title: &str, kind: &str) -> Self {
        self.stories
            .insert(number, (title.to_string(), kind.to_string()));
        self
    }
}

#[async_trait]
impl StoryTracker for InMemoryTracker {
    async fn fetch_story(&self, reference: &StoryReference) -> Result<StoryRecord, TrackerError> {
        match self.stories.get(&reference.number()) {
            Some((title, kind)) => Ok(StoryRecord {
                id: reference.id().to_string(),
                title: title.clone(),
                kind: StoryKind::classify(kind),
            }),
            None => Err(TrackerError::StoryNotFound(reference.id().to_string())),
        }
    }
}

/// A tracker that always reports an auth failure.
pub struct AuthFailingTracker;

#[async_trait]
impl StoryTracker for AuthFailingTracker {
    async fn fetch_story(&self, _reference: &StoryReference) -> Result<StoryRecord, TrackerError> {
        Err(TrackerError::AuthFailed { status: 401 })
    }
}
