//! GitHub release publishing using octocrab.

pub mod auth;
pub mod release;

pub use auth::github_token;
pub use release::{
    PublishOptions, parse_github_remote, publish_release, publish_release_with_client,
};
