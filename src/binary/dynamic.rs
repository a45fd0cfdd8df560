//! Dynamic section walking
//!
//! Reads the `SHT_DYNAMIC` section of an ELF file as a sequence of
//! `(tag, value)` pairs and resolves string-valued entries against the
//! section's linked string table.

use super::common::{Dependencies, DynTag};
use super::elf::{string_at, ElfError, ElfReader};
use crate::error::{Error, Result};
use goblin::elf::section_header::SHT_DYNAMIC;
use std::fs;
use std::path::Path;
use tracing::trace;

/// Shared libraries required by the binary at `path` (`DT_NEEDED` entries)
pub fn extract_dependencies<P: AsRef<Path>>(path: P) -> Result<Dependencies> {
    extract_dyn_strings(path, DynTag::NEEDED)
}

/// All string values of `tag` in the binary at `path`, in on-disk order.
///
/// Fails with [`Error::InvalidArgument`] before touching the file when `tag`
/// is not string-valued.
pub fn extract_dyn_strings<P: AsRef<Path>>(path: P, tag: DynTag) -> Result<Dependencies> {
    if !tag.is_string_valued() {
        return Err(Error::InvalidArgument { tag: tag.0 });
    }

    let path = path.as_ref();
    let data = fs::read(path).map_err(|e| Error::from_io(path, e))?;
    let reader = ElfReader::parse(data).map_err(|e| Error::format(path, e))?;

    dyn_strings(&reader, tag).map_err(|e| Error::format(path, e))
}

/// Collect the string values of `tag` from an already parsed file
pub fn dyn_strings(reader: &ElfReader, tag: DynTag) -> Result<Dependencies, ElfError> {
    let mut found = Dependencies::default();

    let Some(index) = reader.section_by_type(SHT_DYNAMIC) else {
        // statically linked
        return Ok(found);
    };
    let dynamic = reader.section_data(index)?;
    let strtab = reader.string_table(reader.sections()[index].sh_link)?;

    let width = reader.width();
    let field = width.dyn_entry_size() / 2;
    for entry in dynamic.chunks_exact(width.dyn_entry_size()) {
        let entry_tag = reader.read_uint(&entry[..field]);
        if entry_tag != tag.0 {
            continue;
        }

        let offset = reader.read_uint(&entry[field..]);
        match string_at(strtab, offset) {
            Some(name) if !name.is_empty() => {
                found.push(width, String::from_utf8_lossy(name).into_owned());
            }
            _ => trace!(offset, "skipping {} entry with no string", tag),
        }
    }

    Ok(found)
}
