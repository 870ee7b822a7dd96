//! Semver parsing and successor calculation.

use semver::Version;

use crate::error::VersionError;

use super::bump::BumpSeverity;

/// Parse a previous-version string such as `v1.2.3` or `1.2.3`.
///
/// Strict on purpose: a malformed or hand-edited tag here would corrupt
/// every subsequent release, so anything beyond three dot-separated
/// non-negative integers (prereleases and build metadata included) is
/// rejected.
pub fn parse_version(input: &str) -> Result<Version, VersionError> {
    let trimmed = input.trim();
    let raw = trimmed.strip_prefix('v').unwrap_or(trimmed);

    let version =
        Version::parse(raw).map_err(|_| VersionError::InvalidVersion(input.to_string()))?;

    if !version.pre.is_empty() || !version.build.is_empty() {
        return Err(VersionError::InvalidVersion(input.to_string()));
    }

    Ok(version)
}

/// Compute the next version for a bump severity.
///
/// The absence of a previous version is treated as `0.0.0`, so a first
/// release is always at least `0.0.1`.
pub fn next_version(previous: Option<&Version>, severity: BumpSeverity) -> Version {
    let base = previous.cloned().unwrap_or_else(|| Version::new(0, 0, 0));

    match severity {
        BumpSeverity::Major => Version::new(base.major + 1, 0, 0),
        BumpSeverity::Minor => Version::new(base.major, base.minor + 1, 0),
        BumpSeverity::Patch => Version::new(base.major, base.minor, base.patch + 1),
    }
}

/// Render a version as a `v`-prefixed tag name.
pub fn tag_for(version: &Version) -> String {
    format!("v{}", version)
}
