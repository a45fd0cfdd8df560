//! Binary inspection module
//!
//! Classifies candidate files by their magic number and extracts string-valued
//! dynamic section entries (`DT_NEEDED` by default) from ELF binaries.

use std::path::Path;

pub mod classifier;
pub mod common;
pub mod dynamic;
pub mod elf;

#[cfg(test)]
pub(crate) mod fixtures;

pub use classifier::{has_elf_magic, is_target_binary};
pub use common::{Dependencies, DependencyRecord, DynTag, Width};
pub use dynamic::{dyn_strings, extract_dependencies, extract_dyn_strings};
pub use elf::{string_at, ElfError, ElfReader};

use crate::error::Result;

/// Classify `path` and, if it is an ELF file, extract the values of `tag`.
///
/// Returns `Ok(None)` for files that are not ELF binaries.
pub fn inspect_file<P: AsRef<Path>>(path: P, tag: DynTag) -> Result<Option<Dependencies>> {
    let path = path.as_ref();
    if !is_target_binary(path)? {
        return Ok(None);
    }
    extract_dyn_strings(path, tag).map(Some)
}
