//! shipnote - CLI entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use git2::Repository;
use semver::Version;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shipnote::git::{collect_messages, latest_version_tag, resolve_range, version_tag_at_head};
use shipnote::github::{PublishOptions, github_token, parse_github_remote, publish_release};
use shipnote::release::{NotesOptions, ReleaseOutcome, compute_release, parse_version};
use shipnote::story::{DEFAULT_PREFIX, ReferenceExtractor, ShortcutClient};

/// Compute the next version and release notes from tracker stories.
#[derive(Parser, Debug)]
#[command(name = "shipnote")]
#[command(about = "Compute the next version and release notes from tracker stories")]
#[command(version)]
struct Cli {
    /// Previous release tag (e.g. v1.2.3); defaults to the latest version tag
    #[arg(long)]
    prev_version: Option<String>,

    /// Repository path
    #[arg(long, default_value = ".")]
    repo_path: PathBuf,

    /// End of the commit range
    #[arg(long, default_value = "HEAD")]
    to: String,

    /// Story identifier prefix
    #[arg(long, default_value = DEFAULT_PREFIX)]
    story_prefix: String,

    /// Render story titles as links back to the tracker
    #[arg(long)]
    include_story_links: bool,

    /// Release title (defaults to the version tag)
    #[arg(long)]
    title: Option<String>,

    /// Text prepended verbatim to the release notes
    #[arg(long)]
    prefix: Option<String>,

    /// Create a GitHub release for the computed version
    #[arg(long)]
    publish: bool,

    /// Mark the published release as a draft
    #[arg(long)]
    draft: bool,

    /// Mark the published release as a prerelease
    #[arg(long)]
    prerelease: bool,

    /// Asset file to attach to the published release (repeatable)
    #[arg(long = "asset")]
    assets: Vec<PathBuf>,

    /// Print the result without publishing
    #[arg(long)]
    dry_run: bool,
}

/// Stdout contract consumed by the invoking workflow: one JSON object.
#[derive(Serialize)]
struct CliOutput<'a> {
    tag: &'a str,
    release_notes: &'a str,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let repo = Repository::open(&cli.repo_path)
        .context("Not a git repository. Pass --repo-path or run from within one.")?;

    // Previous version: the explicit flag wins, then the latest version tag.
    // A malformed flag is fatal before any bump is computed.
    let (from_ref, previous_version) = match cli.prev_version.as_deref() {
        Some(raw) => {
            let version = parse_version(raw)?;
            (Some(raw.to_string()), Some(version))
        }
        None => match latest_version_tag(&repo).context("Failed to enumerate tags")? {
            Some(tag) => (Some(tag.name.clone()), Some(tag.version)),
            None => (None, None),
        },
    };

    let range = resolve_range(&repo, from_ref.as_deref(), &cli.to)
        .context("Failed to resolve commit range")?;

    let messages = collect_messages(&repo, range.from, range.to)
        .context("Failed to collect commit messages")?;

    info!(
        count = messages.len(),
        from = %range.from_ref,
        to = %range.to_ref,
        "Analyzing commits"
    );

    let extractor = ReferenceExtractor::new(&cli.story_prefix)?;
    let tracker =
        Arc::new(ShortcutClient::from_env().context("Tracker credentials are required")?);

    let notes_options = NotesOptions {
        prefix: cli.prefix.clone(),
        include_story_links: cli.include_story_links,
    };

    let mut outcome = compute_release(
        tracker,
        &extractor,
        &messages,
        previous_version.as_ref(),
        &notes_options,
    )
    .await
    .context("Failed to compute release")?;

    // An already-tagged HEAD reuses its version so re-runs are idempotent.
    if let Some(existing) = version_tag_at_head(&repo)? {
        info!(tag = %existing.name, "HEAD already tagged; reusing its version");
        outcome.version = existing.version;
    }

    if !outcome.unresolved.is_empty() {
        warn!(
            count = outcome.unresolved.len(),
            "Some story references could not be resolved"
        );
    }

    let tag = outcome.tag();
    let output = CliOutput {
        tag: &tag,
        release_notes: &outcome.release_notes,
    };
    println!(
        "{}",
        serde_json::to_string(&output).context("Failed to encode result")?
    );

    if cli.publish && !cli.dry_run {
        publish(&repo, &cli, &tag, &outcome).await?;
    }

    Ok(())
}

/// Create the GitHub release for the computed version.
async fn publish(repo: &Repository, cli: &Cli, tag: &str, outcome: &ReleaseOutcome) -> Result<()> {
    let token = github_token().context("GitHub authentication required for publishing")?;

    let remote = repo
        .find_remote("origin")
        .context("No 'origin' remote found")?;
    let url = remote.url().context("Remote has no URL")?;
    let (owner, repo_name) =
        parse_github_remote(url).context("Could not parse GitHub remote URL")?;

    let options = PublishOptions {
        tag: tag.to_string(),
        title: cli.title.clone().unwrap_or_else(|| tag.to_string()),
        body: outcome.release_notes.clone(),
        draft: cli.draft,
        prerelease: cli.prerelease,
        assets: cli.assets.clone(),
    };

    publish_release(&token, &owner, &repo_name, &options)
        .await
        .context("Failed to publish release")?;

    info!(%tag, repo = %format!("{}/{}", owner, repo_name), "Published release");
    Ok(())
}
