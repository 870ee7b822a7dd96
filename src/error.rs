//! Error types for shipnote modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to find reference '{0}': {1}")]
    ReferenceNotFound(String, #[source] git2::Error),

    #[error("Failed to parse commit: {0}")]
    ParseCommit(#[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),
}

/// Errors from story reference extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Story prefix '{0}' must be non-empty ASCII alphanumeric")]
    InvalidPrefix(String),
}

/// Errors from the story tracker API.
///
/// Per-story failures (`StoryNotFound`, `RequestFailed`, `InvalidResponse`)
/// drop that story with a warning. Systemic failures (`MissingToken`,
/// `AuthFailed`, `Unavailable`) abort the whole resolution.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("SHORTCUT_API_TOKEN environment variable is not set")]
    MissingToken,

    #[error("Tracker authentication failed (HTTP {status}). Check SHORTCUT_API_TOKEN")]
    AuthFailed { status: u16 },

    #[error("Tracker request failed: {message}")]
    Transport { message: String },

    #[error("Tracker unreachable after {attempts} attempt(s): {message}")]
    Unavailable { attempts: u32, message: String },

    #[error("Story {0} not found in tracker")]
    StoryNotFound(String),

    #[error("Tracker returned HTTP {status} for story {reference}")]
    RequestFailed { reference: String, status: u16 },

    #[error("Failed to decode tracker response for {reference}: {message}")]
    InvalidResponse { reference: String, message: String },
}

impl TrackerError {
    /// Whether this failure poisons the whole batch rather than one story.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingToken
                | Self::AuthFailed { .. }
                | Self::Transport { .. }
                | Self::Unavailable { .. }
        )
    }

    /// Whether a bounded retry might help.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::RequestFailed { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }
}

/// Errors from version parsing.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid version '{0}': expected vMAJOR.MINOR.PATCH")]
    InvalidVersion(String),
}

/// Errors from GitHub release publishing.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error(
        "GitHub authentication failed: no valid auth found. Run 'gh auth login' or set GITHUB_TOKEN environment variable"
    )]
    AuthenticationFailed,

    #[error("Failed to create release {tag}: {source}")]
    CreateRelease {
        tag: String,
        #[source]
        source: Box<octocrab::Error>,
    },

    #[error("Failed to read asset file '{0}': {1}")]
    ReadAsset(String, #[source] std::io::Error),

    #[error("Failed to upload asset '{name}': {message}")]
    UploadAsset { name: String, message: String },

    #[error("Failed to parse repository URL")]
    InvalidRepositoryUrl,
}
