//! Per-library aggregation of dependency records
//!
//! Folds `(file, library, width)` records into one aggregate per library and
//! width, then ranks the aggregates by how many binaries reference them.

use crate::binary::{DependencyRecord, Width};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::path::PathBuf;

/// Reference count and referring files for one library
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryAggregate {
    pub count: usize,
    /// Files in the order they were folded in, duplicates kept
    #[serde(serialize_with = "serialize_paths")]
    pub files: Vec<PathBuf>,
    #[serde(rename = "lib")]
    pub library: String,
}

/// Aggregates ranked by descending reference count, per width
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    pub x32: Vec<LibraryAggregate>,
    pub x64: Vec<LibraryAggregate>,
}

impl RankedResult {
    pub fn is_empty(&self) -> bool {
        self.x32.is_empty() && self.x64.is_empty()
    }
}

#[derive(Debug, Default)]
struct WidthGroup {
    positions: HashMap<String, usize>,
    aggregates: Vec<LibraryAggregate>,
}

impl WidthGroup {
    fn push(&mut self, library: String, source_file: PathBuf) {
        match self.positions.get(&library) {
            Some(&pos) => {
                let aggregate = &mut self.aggregates[pos];
                aggregate.count += 1;
                aggregate.files.push(source_file);
            }
            None => {
                self.positions.insert(library.clone(), self.aggregates.len());
                self.aggregates.push(LibraryAggregate {
                    count: 1,
                    files: vec![source_file],
                    library,
                });
            }
        }
    }

    fn ranked(mut self) -> Vec<LibraryAggregate> {
        // stable: equal counts keep first-seen order
        self.aggregates.sort_by(|a, b| b.count.cmp(&a.count));
        self.aggregates
    }
}

/// Accumulates dependency records and produces a [`RankedResult`]
#[derive(Debug, Default)]
pub struct Aggregator {
    x32: WidthGroup,
    x64: WidthGroup,
    records: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single record in
    pub fn push(&mut self, record: DependencyRecord) {
        let group = match record.width {
            Width::X32 => &mut self.x32,
            Width::X64 => &mut self.x64,
        };
        group.push(record.library, record.source_file);
        self.records += 1;
    }

    /// Number of records folded in so far
    pub fn records(&self) -> usize {
        self.records
    }

    pub fn finish(self) -> RankedResult {
        RankedResult {
            x32: self.x32.ranked(),
            x64: self.x64.ranked(),
        }
    }
}

impl Extend<DependencyRecord> for Aggregator {
    fn extend<I: IntoIterator<Item = DependencyRecord>>(&mut self, records: I) {
        for record in records {
            self.push(record);
        }
    }
}

/// Aggregate and rank a sequence of records in one go
pub fn aggregate<I: IntoIterator<Item = DependencyRecord>>(records: I) -> RankedResult {
    let mut aggregator = Aggregator::new();
    aggregator.extend(records);
    aggregator.finish()
}

fn serialize_paths<S: Serializer>(paths: &[PathBuf], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(paths.iter().map(|p| p.to_string_lossy()))
}
