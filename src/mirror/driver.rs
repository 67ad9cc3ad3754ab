//! Batch extraction over a project list

use std::io::Write;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_CHECKPOINT_INTERVAL;
use crate::encoding::decode_utf8_sig;
use crate::extract::{MetadataKind, extract_metadata};
use crate::index::{ArtifactFetcher, PackageIndex};
use crate::mirror::error::{DriverError, PipelineError};
use crate::mirror::record::{ExtractionRecord, OutcomeKind};
use crate::mirror::store::CacheStorer;
use crate::version::{ReleaseVersion, select_latest};

/// Counters for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Projects that received a new record
    pub processed: usize,
    /// Projects already present in the cache
    pub skipped: usize,
    /// Snapshots written, including the final one
    pub checkpoints: usize,
    pub outcomes: IndexMap<OutcomeKind, usize>,
}

impl BatchSummary {
    pub fn count(&self, kind: OutcomeKind) -> usize {
        self.outcomes.get(&kind).copied().unwrap_or(0)
    }

    fn record(&mut self, kind: OutcomeKind) {
        self.processed += 1;
        *self.outcomes.entry(kind).or_default() += 1;
    }
}

/// Drives list, select, fetch, extract and decode for every uncached project
pub struct BatchDriver<'a, S: CacheStorer> {
    index: &'a dyn PackageIndex,
    fetcher: &'a dyn ArtifactFetcher,
    storer: &'a S,
    checkpoint_interval: usize,
}

impl<'a, S: CacheStorer> BatchDriver<'a, S> {
    pub fn new(
        index: &'a dyn PackageIndex,
        fetcher: &'a dyn ArtifactFetcher,
        storer: &'a S,
    ) -> Self {
        Self {
            index,
            fetcher,
            storer,
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
        }
    }

    /// Number of new records between snapshots; zero is treated as one
    pub fn with_checkpoint_interval(mut self, interval: usize) -> Self {
        self.checkpoint_interval = interval.max(1);
        self
    }

    /// Run the batch over `projects`
    ///
    /// Projects already in the stored cache are skipped without any index
    /// or download call. Each new record writes one progress mark; every
    /// `checkpoint_interval` new records the whole cache is saved and the
    /// running total is written. A final save always follows the loop.
    pub async fn run<W: Write>(
        &self,
        projects: &[String],
        progress: &mut W,
    ) -> Result<BatchSummary, DriverError> {
        let mut cache = self.storer.load()?;
        let mut summary = BatchSummary::default();
        info!(
            "Starting batch over {} projects ({} cached)",
            projects.len(),
            cache.len()
        );

        for project in projects {
            if cache.contains_key(project) {
                debug!("Skipping cached project {}", project);
                summary.skipped += 1;
                continue;
            }

            let record = self.process_project(project).await;
            write!(progress, "{}", record.kind.progress_mark())?;
            progress.flush()?;

            summary.record(record.kind);
            cache.insert(project.clone(), record);

            if summary.processed % self.checkpoint_interval == 0 {
                write!(progress, "\n\n{}", cache.len())?;
                progress.flush()?;
                self.storer.save(&cache)?;
                summary.checkpoints += 1;
                info!("Checkpoint at {} records", cache.len());
            }
        }

        self.storer.save(&cache)?;
        summary.checkpoints += 1;
        info!(
            "Batch finished: {} processed, {} skipped, {} records",
            summary.processed,
            summary.skipped,
            cache.len()
        );
        Ok(summary)
    }

    /// Build the record for one project; never fails
    pub async fn process_project(&self, project: &str) -> ExtractionRecord {
        let mut version = ReleaseVersion::Sentinel;

        match self.extract_project(project, &mut version).await {
            Ok((kind, content)) => {
                info!("{}: {} {}", project, kind.as_str(), version);
                ExtractionRecord::success(kind, content, &version)
            }
            Err(e) => {
                let record = ExtractionRecord::failure(&e, &version);
                warn!("{}: {} ({})", project, record.kind.as_str(), e);
                record
            }
        }
    }

    async fn extract_project(
        &self,
        project: &str,
        version: &mut ReleaseVersion,
    ) -> Result<(MetadataKind, String), PipelineError> {
        let files = self.index.project_files(project).await?;
        let selected = select_latest(project, &files)?;
        *version = selected.version;

        let bytes = self.fetcher.fetch(&selected.file.url).await?;
        let (kind, raw) = extract_metadata(&selected.file.filename, &bytes)?;
        Ok((kind, decode_utf8_sig(&raw)?))
    }
}
