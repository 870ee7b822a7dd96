//! GitHub token discovery for release publishing.
//!
//! Auth order: gh CLI, then `GITHUB_TOKEN`, then `GH_TOKEN`.

use std::env;
use std::process::Command;

use tracing::debug;

use crate::error::PublishError;

/// Get a GitHub token using the configured auth order.
pub fn github_token() -> Result<String, PublishError> {
    if let Some(token) = token_from_gh_cli() {
        debug!("Using GitHub token from gh CLI");
        return Ok(token);
    }

    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = env::var(var) {
            if !token.is_empty() {
                debug!(source = var, "Using GitHub token from environment");
                return Ok(token);
            }
        }
    }

    Err(PublishError::AuthenticationFailed)
}

/// Ask the gh CLI for its token; any failure falls through to env vars.
fn token_from_gh_cli() -> Option<String> {
    let output = Command::new("gh").args(["auth", "token"]).output().ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}
