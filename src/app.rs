//! Subcommand entry points

use std::io::Write;

use anyhow::Context;
use tracing::info;

use crate::index::{ArtifactFetcher, PackageIndex, ProjectMirror};
use crate::mirror::{BatchDriver, BatchSummary, CacheStorer, OutcomeKind};
use crate::scan::find_dependents;

/// Extract every project in the (mirrored or live) project list into the cache
pub async fn run_mirror<S: CacheStorer, W: Write>(
    index: &dyn PackageIndex,
    fetcher: &dyn ArtifactFetcher,
    project_mirror: &ProjectMirror,
    storer: &S,
    checkpoint_interval: usize,
    progress: &mut W,
) -> anyhow::Result<BatchSummary> {
    let projects = project_mirror
        .list_projects(index)
        .await
        .context("Failed to list projects")?;

    let summary = BatchDriver::new(index, fetcher, storer)
        .with_checkpoint_interval(checkpoint_interval)
        .run(&projects, progress)
        .await
        .context("Batch aborted")?;

    writeln!(progress)?;
    for kind in OutcomeKind::ALL {
        let count = summary.count(kind);
        if count > 0 {
            info!("{}: {}", kind.as_str(), count);
        }
    }
    Ok(summary)
}

/// Print, one per line, every cached project whose dependencies mention `prefix`
pub fn run_analyze<S: CacheStorer, W: Write>(
    storer: &S,
    prefix: &str,
    out: &mut W,
) -> anyhow::Result<usize> {
    let cache = storer.load().context("Failed to load cache")?;
    let dependents = find_dependents(&cache, prefix);

    for project in &dependents {
        writeln!(out, "{}", project)?;
    }
    Ok(dependents.len())
}

/// Refresh the project-list mirror and/or print projects missing from it
pub async fn run_projects<W: Write>(
    index: &dyn PackageIndex,
    project_mirror: &ProjectMirror,
    download: bool,
    new: bool,
    out: &mut W,
) -> anyhow::Result<()> {
    // Compare against the mirror before it is refreshed
    if new {
        let projects = project_mirror
            .new_projects(index)
            .await
            .context("Failed to compare project list with mirror")?;
        for project in &projects {
            writeln!(out, "{}", project)?;
        }
        info!("{} projects missing from mirror", projects.len());
    }

    if download {
        let count = project_mirror
            .download(index)
            .await
            .context("Failed to download project list")?;
        writeln!(
            out,
            "Saved {} projects to {}",
            count,
            project_mirror.path().display()
        )?;
    }

    if !download && !new {
        let count = project_mirror
            .load()
            .context("Failed to read project mirror")?
            .len();
        writeln!(out, "{}: {} projects", project_mirror.path().display(), count)?;
    }

    Ok(())
}
