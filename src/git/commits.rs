//! Commit message collection for a release range.

use git2::Repository;
use tracing::debug;

use crate::error::GitError;

/// Collect commit summaries between two commits, oldest first.
///
/// Walks `from..to`, i.e. commits reachable from `to` but not from `from`.
/// `from = None` walks all the way back to the root commit. Only the summary
/// line is kept; that is where story references live by convention.
pub fn collect_messages(
    repo: &Repository,
    from: Option<git2::Oid>,
    to: git2::Oid,
) -> Result<Vec<String>, GitError> {
    let mut revwalk = repo.revwalk().map_err(GitError::RevwalkError)?;

    revwalk.push(to).map_err(GitError::RevwalkError)?;
    if let Some(from_oid) = from {
        revwalk.hide(from_oid).map_err(GitError::RevwalkError)?;
    }
    revwalk
        .set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::REVERSE)
        .map_err(GitError::RevwalkError)?;

    let mut messages = Vec::new();
    for oid_result in revwalk {
        let oid = oid_result.map_err(GitError::RevwalkError)?;
        let commit = repo.find_commit(oid).map_err(GitError::ParseCommit)?;
        messages.push(commit.summary().unwrap_or("").to_string());
    }

    debug!(count = messages.len(), "Collected commit messages");
    Ok(messages)
}
