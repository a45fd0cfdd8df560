//! Scan configuration

use crate::binary::DynTag;
use std::num::NonZeroUsize;
use std::thread;

/// Settings for one scan run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Dynamic tag whose string values are aggregated
    pub tag: DynTag,
    /// Maximum number of files inspected concurrently
    pub jobs: NonZeroUsize,
    /// Warn about and skip malformed ELF files instead of aborting the run
    pub skip_malformed: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tag: DynTag::NEEDED,
            jobs: thread::available_parallelism().unwrap_or(NonZeroUsize::MIN),
            skip_malformed: false,
        }
    }
}

impl ScanConfig {
    pub fn with_tag(mut self, tag: DynTag) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = NonZeroUsize::new(jobs).unwrap_or(NonZeroUsize::MIN);
        self
    }

    pub fn with_skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed = skip;
        self
    }
}
