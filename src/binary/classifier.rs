//! ELF detection from the leading bytes of a file

use crate::error::{Error, Result};
use goblin::elf::header::{ELFMAG, SELFMAG};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Check for the ELF magic number
pub fn has_elf_magic(data: &[u8]) -> bool {
    data.len() >= SELFMAG && &data[..SELFMAG] == ELFMAG
}

/// Decide whether the file at `path` is an ELF binary.
///
/// Only the first four bytes are read. Empty and short files are not ELF
/// files and are not errors. Failures to open or read are returned as the
/// matching [`Error`] variant so callers can decide whether to skip.
pub fn is_target_binary<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::from_io(path, e))?;

    let mut magic = Vec::with_capacity(SELFMAG);
    file.take(SELFMAG as u64)
        .read_to_end(&mut magic)
        .map_err(|e| Error::from_io(path, e))?;

    Ok(has_elf_magic(&magic))
}
