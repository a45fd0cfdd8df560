//! Scan pipeline
//!
//! Walks the input paths, inspects every candidate on the blocking pool and
//! folds the extracted names into a single [`Aggregator`] in candidate order,
//! so results do not depend on which inspection finishes first.

pub mod walk;

pub use walk::{find_all, find_binaries, WalkReport};

use crate::aggregate::{Aggregator, RankedResult};
use crate::binary::{self, Dependencies};
use crate::config::ScanConfig;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tokio::task::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Outcome of a scan run
#[derive(Debug, Default)]
pub struct ScanReport {
    pub result: RankedResult,
    /// Number of ELF files whose dynamic section was read
    pub inspected: usize,
    /// Paths that were reported and skipped
    pub skipped: Vec<Error>,
}

type Inspection = JoinHandle<(PathBuf, Result<Option<Dependencies>>)>;

/// Runs classification, extraction and aggregation over a set of paths
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Walk `roots` recursively and aggregate the dependencies of every ELF file found
    pub async fn scan<P: AsRef<Path>>(&self, roots: &[P]) -> Result<ScanReport> {
        let roots: Vec<PathBuf> = roots.iter().map(|r| r.as_ref().to_path_buf()).collect();
        let walk = run_blocking(move || walk::find_all(roots.as_slice())).await?;
        debug!(candidates = walk.binaries.len(), "walk finished");

        let mut report = self.scan_candidates(walk.binaries).await?;
        let mut skipped = walk.skipped;
        skipped.append(&mut report.skipped);
        report.skipped = skipped;
        Ok(report)
    }

    /// Inspect an explicit list of candidate files.
    ///
    /// Each candidate is re-classified; files that are not ELF binaries are ignored.
    pub async fn scan_candidates(&self, candidates: Vec<PathBuf>) -> Result<ScanReport> {
        let jobs = self.config.jobs.get();
        let tag = self.config.tag;

        let mut aggregator = Aggregator::new();
        let mut report = ScanReport::default();
        let mut in_flight: VecDeque<Inspection> = VecDeque::with_capacity(jobs);

        for path in candidates {
            if in_flight.len() >= jobs {
                if let Some(next) = in_flight.pop_front() {
                    let (path, outcome) = join(next).await;
                    self.fold(path, outcome, &mut aggregator, &mut report)?;
                }
            }
            in_flight.push_back(task::spawn_blocking(move || {
                let outcome = binary::inspect_file(&path, tag);
                (path, outcome)
            }));
        }

        while let Some(next) = in_flight.pop_front() {
            let (path, outcome) = join(next).await;
            self.fold(path, outcome, &mut aggregator, &mut report)?;
        }

        info!(
            binaries = report.inspected,
            records = aggregator.records(),
            skipped = report.skipped.len(),
            "scan complete"
        );
        report.result = aggregator.finish();
        Ok(report)
    }

    fn fold(
        &self,
        path: PathBuf,
        outcome: Result<Option<Dependencies>>,
        aggregator: &mut Aggregator,
        report: &mut ScanReport,
    ) -> Result<()> {
        match outcome {
            Ok(Some(deps)) => {
                debug!(path = %path.display(), names = deps.len(), "inspected");
                report.inspected += 1;
                aggregator.extend(deps.into_records(&path));
            }
            Ok(None) => debug!(path = %path.display(), "not an ELF file"),
            Err(error) if error.is_skippable() => {
                warn!("{}", error);
                report.skipped.push(error);
            }
            Err(error @ Error::Format { .. }) if self.config.skip_malformed => {
                warn!("skipping {}", error);
                report.skipped.push(error);
            }
            Err(error) => return Err(error),
        }
        Ok(())
    }
}

async fn join(handle: Inspection) -> (PathBuf, Result<Option<Dependencies>>) {
    match handle.await {
        Ok(inspection) => inspection,
        Err(err) => std::panic::resume_unwind(err.into_panic()),
    }
}

async fn run_blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match task::spawn_blocking(f).await {
        Ok(value) => value,
        Err(err) => std::panic::resume_unwind(err.into_panic()),
    }
}
