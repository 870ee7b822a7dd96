//! GitHub release creation and asset upload via octocrab.

use std::path::{Path, PathBuf};

use octocrab::Octocrab;
use tracing::info;

use crate::error::PublishError;

/// Release parameters passed through from caller configuration.
///
/// The engine computes `tag` and `body`; everything else is caller intent
/// that this module forwards unmodified.
#[derive(Debug, Clone)]
pub struct PublishOptions {
    pub tag: String,
    pub title: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
    pub assets: Vec<PathBuf>,
}

/// Create a GitHub release and upload any configured assets.
///
/// This is the main entry point that constructs the octocrab client.
pub async fn publish_release(
    token: &str,
    owner: &str,
    repo: &str,
    options: &PublishOptions,
) -> Result<(), PublishError> {
    let octocrab = Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(|e| PublishError::CreateRelease {
            tag: options.tag.clone(),
            source: Box::new(e),
        })?;

    publish_release_with_client(&octocrab, token, owner, repo, options).await
}

/// Create a release using a pre-configured client.
///
/// This allows dependency injection for testing with mock servers.
pub async fn publish_release_with_client(
    octocrab: &Octocrab,
    token: &str,
    owner: &str,
    repo: &str,
    options: &PublishOptions,
) -> Result<(), PublishError> {
    let release = octocrab
        .repos(owner, repo)
        .releases()
        .create(&options.tag)
        .name(&options.title)
        .body(&options.body)
        .draft(options.draft)
        .prerelease(options.prerelease)
        .send()
        .await
        .map_err(|e| PublishError::CreateRelease {
            tag: options.tag.clone(),
            source: Box::new(e),
        })?;

    info!(tag = %options.tag, "Created GitHub release");

    if options.assets.is_empty() {
        return Ok(());
    }

    // upload_url is a URI template ("...{?name,label}"); strip the template.
    let upload_base = release
        .upload_url
        .split('{')
        .next()
        .unwrap_or(&release.upload_url)
        .to_string();

    let http = reqwest::Client::new();
    for asset in &options.assets {
        upload_asset(&http, token, &upload_base, asset).await?;
    }

    Ok(())
}

/// Upload one asset to the release's upload endpoint.
async fn upload_asset(
    http: &reqwest::Client,
    token: &str,
    upload_base: &str,
    path: &Path,
) -> Result<(), PublishError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("asset")
        .to_string();

    let data = std::fs::read(path)
        .map_err(|e| PublishError::ReadAsset(path.display().to_string(), e))?;

    let response = http
        .post(upload_base)
        .query(&[("name", name.as_str())])
        .bearer_auth(token)
        .header("Content-Type", "application/octet-stream")
        .body(data)
        .send()
        .await
        .map_err(|e| PublishError::UploadAsset {
            name: name.clone(),
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(PublishError::UploadAsset {
            name,
            message: format!("HTTP {}", response.status()),
        });
    }

    info!(asset = %name, "Uploaded release asset");
    Ok(())
}

/// Extract owner and repo from a git remote URL.
pub fn parse_github_remote(url: &str) -> Result<(String, String), PublishError> {
    // SSH format: git@github.com:owner/repo.git
    if let Some(path) = url.strip_prefix("git@github.com:") {
        return parse_owner_repo_path(path);
    }

    // HTTPS format: https://github.com/owner/repo.git
    if let Some(path) = url.split("github.com/").nth(1) {
        return parse_owner_repo_path(path);
    }

    Err(PublishError::InvalidRepositoryUrl)
}

fn parse_owner_repo_path(path: &str) -> Result<(String, String), PublishError> {
    let path = path.strip_suffix(".git").unwrap_or(path);
    let mut parts = path.split('/');

    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(PublishError::InvalidRepositoryUrl),
    }
}
