//! Release range resolution.

use git2::{Oid, Repository};

use crate::error::GitError;

use super::tags::latest_version_tag;

/// Resolved release range.
///
/// `from` is the previous release point; `None` means the range is unbounded
/// (first release, walk back to the root commit).
#[derive(Debug, Clone)]
pub struct ReleaseRange {
    pub from: Option<Oid>,
    pub to: Oid,
    pub from_ref: String,
    pub to_ref: String,
}

/// Resolve the commit range for a release.
///
/// `from` defaults to the latest version tag; a repository with no version
/// tags yields an unbounded range.
pub fn resolve_range(
    repo: &Repository,
    from: Option<&str>,
    to: &str,
) -> Result<ReleaseRange, GitError> {
    let to_oid = resolve_reference(repo, to)?;

    let (from_oid, from_ref) = match from {
        Some(name) => (Some(resolve_reference(repo, name)?), name.to_string()),
        None => match latest_version_tag(repo)? {
            Some(tag) => (Some(tag.oid), tag.name),
            None => (None, "start".to_string()),
        },
    };

    Ok(ReleaseRange {
        from: from_oid,
        to: to_oid,
        from_ref,
        to_ref: to.to_string(),
    })
}

/// Resolve a reference (tag, branch, commit hash) to a commit OID.
fn resolve_reference(repo: &Repository, reference: &str) -> Result<Oid, GitError> {
    // A full commit hash resolves directly.
    if let Ok(oid) = Oid::from_str(reference) {
        if repo.find_commit(oid).is_ok() {
            return Ok(oid);
        }
    }

    let object = repo
        .revparse_single(reference)
        .map_err(|e| GitError::ReferenceNotFound(reference.to_string(), e))?;

    Ok(object.peel_to_commit().map_err(GitError::ParseCommit)?.id())
}
