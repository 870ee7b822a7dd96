//! Shortcut tracker API client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::error::TrackerError;

use super::extract::StoryReference;
use super::record::{StoryKind, StoryRecord};

/// Default Shortcut API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.app.shortcut.com/api/v3";

/// Read-only story lookup.
///
/// Implemented by [`ShortcutClient`] and by test doubles; the resolver and
/// engine only see this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryTracker: Send + Sync {
    /// Fetch metadata for one story. One network round-trip per call.
    async fn fetch_story(&self, reference: &StoryReference) -> Result<StoryRecord, TrackerError>;
}

/// HTTP client for the Shortcut v3 API.
pub struct ShortcutClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

/// Relevant subset of the Shortcut story payload.
#[derive(Debug, Deserialize)]
struct StoryResponse {
    name: String,
    #[serde(default)]
    story_type: String,
}

impl ShortcutClient {
    /// Build a client from the environment.
    ///
    /// `SHORTCUT_API_TOKEN` is required; `SHORTCUT_API_URL` overrides the
    /// endpoint, which the mock-server tests rely on.
    pub fn from_env() -> Result<Self, TrackerError> {
        let token = std::env::var("SHORTCUT_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(TrackerError::MissingToken)?;

        let base_url =
            std::env::var("SHORTCUT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self::new(base_url, token))
    }

    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl StoryTracker for ShortcutClient {
    async fn fetch_story(&self, reference: &StoryReference) -> Result<StoryRecord, TrackerError> {
        let url = format!("{}/stories/{}", self.base_url, reference.number());
        debug!(story = %reference, "Fetching story details");

        let response = self
            .http
            .get(&url)
            .header("Shortcut-Token", &self.token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| TrackerError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        match status {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(TrackerError::AuthFailed {
                    status: status.as_u16(),
                });
            }
            StatusCode::NOT_FOUND => {
                return Err(TrackerError::StoryNotFound(reference.id().to_string()));
            }
            _ => {
                return Err(TrackerError::RequestFailed {
                    reference: reference.id().to_string(),
                    status: status.as_u16(),
                });
            }
        }

        let story: StoryResponse =
            response
                .json()
                .await
                .map_err(|e| TrackerError::InvalidResponse {
                    reference: reference.id().to_string(),
                    message: e.to_string(),
                })?;

        Ok(StoryRecord {
            id: reference.id().to_string(),
            title: story.name,
            kind: StoryKind::classify(&story.story_type),
        })
    }
}
