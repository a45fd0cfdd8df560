//! Recursive discovery of ELF files under the input paths

use crate::binary::is_target_binary;
use crate::error::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// ELF files found under a set of roots, plus the paths that had to be skipped
#[derive(Debug, Default)]
pub struct WalkReport {
    pub binaries: Vec<PathBuf>,
    pub skipped: Vec<Error>,
}

impl WalkReport {
    fn skip(&mut self, error: Error) {
        warn!("{}", error);
        self.skipped.push(error);
    }
}

/// Walk every root in order and collect the ELF files beneath them
pub fn find_all<P: AsRef<Path>>(roots: &[P]) -> Result<WalkReport> {
    let mut report = WalkReport::default();
    for root in roots {
        walk_root(root.as_ref(), &mut report)?;
    }
    Ok(report)
}

/// Collect the ELF files under `root`; a regular file root is checked directly.
///
/// Entries are visited in file name order. Symlinks below the root are not
/// followed and only regular files are classified. Unreadable and vanished
/// paths are reported and skipped; any other I/O failure ends the walk.
pub fn find_binaries<P: AsRef<Path>>(root: P) -> Result<WalkReport> {
    let mut report = WalkReport::default();
    walk_root(root.as_ref(), &mut report)?;
    Ok(report)
}

fn walk_root(root: &Path, report: &mut WalkReport) -> Result<()> {
    debug!(root = %root.display(), "walking");

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                let error = match err.into_io_error() {
                    Some(source) => Error::from_io(&path, source),
                    None => Error::Io {
                        path,
                        source: io::Error::other("filesystem loop"),
                    },
                };
                if error.is_skippable() {
                    report.skip(error);
                    continue;
                }
                return Err(error);
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match is_target_binary(entry.path()) {
            Ok(true) => report.binaries.push(entry.into_path()),
            Ok(false) => {}
            Err(error) if error.is_skippable() => report.skip(error),
            Err(error) => return Err(error),
        }
    }

    Ok(())
}
