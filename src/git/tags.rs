//! Version tag inspection.

use git2::Repository;
use semver::Version;
use tracing::debug;

use crate::error::GitError;

/// A version tag resolved to its commit.
#[derive(Debug, Clone)]
pub struct VersionTag {
    pub name: String,
    pub oid: git2::Oid,
    pub version: Version,
}

/// Strict `vX.Y.Z` / `X.Y.Z` check. Prereleases, build metadata, and
/// nightly-style tags are excluded so they never seed a release range.
fn is_release_tag(name: &str) -> bool {
    let raw = name.strip_prefix('v').unwrap_or(name);
    let mut parts = raw.split('.');
    let major = parts.next();
    let minor = parts.next();
    let patch = parts.next();
    let extra = parts.next();

    extra.is_none()
        && [major, minor, patch].iter().all(|part| {
            part.is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
        })
}

/// Parse a version from a tag name, tolerating a leading `v`.
pub fn version_from_tag(name: &str) -> Option<Version> {
    if !is_release_tag(name) {
        return None;
    }
    Version::parse(name.strip_prefix('v').unwrap_or(name)).ok()
}

/// All strict version tags in the repository, resolved to their commits.
pub fn version_tags(repo: &Repository) -> Result<Vec<VersionTag>, GitError> {
    let mut tags = Vec::new();

    repo.tag_foreach(|oid, name_bytes| {
        if let Ok(name_str) = std::str::from_utf8(name_bytes) {
            let name = name_str
                .strip_prefix("refs/tags/")
                .unwrap_or(name_str)
                .to_string();

            if let Some(version) = version_from_tag(&name) {
                // Annotated tags point at a tag object, not the commit.
                let resolved_oid = match repo.find_tag(oid) {
                    Ok(tag_obj) => tag_obj.target_id(),
                    Err(_) => oid,
                };

                tags.push(VersionTag {
                    name,
                    oid: resolved_oid,
                    version,
                });
            }
        }
        true
    })
    .map_err(GitError::RevwalkError)?;

    Ok(tags)
}

/// The highest version tag in the repository, if any.
pub fn latest_version_tag(repo: &Repository) -> Result<Option<VersionTag>, GitError> {
    let latest = version_tags(repo)?
        .into_iter()
        .max_by(|a, b| a.version.cmp(&b.version));

    if let Some(tag) = &latest {
        debug!(tag = %tag.name, "Latest version tag");
    }

    Ok(latest)
}

/// The version tag pointing at HEAD, if one exists.
///
/// An already-tagged commit reuses its tag instead of bumping again, which
/// makes re-running a release idempotent.
pub fn version_tag_at_head(repo: &Repository) -> Result<Option<VersionTag>, GitError> {
    let head_oid = match repo.head().ok().and_then(|head| head.target()) {
        Some(oid) => oid,
        None => return Ok(None),
    };

    let mut candidates: Vec<VersionTag> = version_tags(repo)?
        .into_iter()
        .filter(|tag| tag.oid == head_oid)
        .collect();
    candidates.sort_by(|a, b| a.version.cmp(&b.version));

    let found = candidates.pop();
    if let Some(tag) = &found {
        debug!(tag = %tag.name, "Found existing version tag at HEAD");
    }

    Ok(found)
}
