//! Error types shared by the classifier, extractor and walker

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::binary::elf::ElfError;

/// Errors produced while scanning paths for ELF dependencies.
///
/// The filesystem variants mirror the OS error categories callers care about,
/// so they can be matched on instead of inspecting error strings.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Permission denied: {}", path.display())]
    Permission { path: PathBuf },

    #[error("Not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("error while reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed ELF file {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: ElfError,
    },

    #[error("non-string-valued dynamic tag {tag:#x}")]
    InvalidArgument { tag: u64 },
}

impl Error {
    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Error::Permission { path },
            io::ErrorKind::NotFound => Error::NotFound { path },
            io::ErrorKind::NotADirectory => Error::NotADirectory { path },
            _ => Error::Io { path, source },
        }
    }

    pub fn format(path: &Path, source: ElfError) -> Self {
        Error::Format {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether a scan reports this error and moves on to the next path.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Error::Permission { .. } | Error::NotFound { .. })
    }

    /// The path this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::Permission { path }
            | Error::NotFound { path }
            | Error::NotADirectory { path }
            | Error::Io { path, .. }
            | Error::Format { path, .. } => Some(path),
            Error::InvalidArgument { .. } => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
