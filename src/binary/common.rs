//! Common types for dependency extraction

use goblin::elf::dynamic::{DT_NEEDED, DT_RPATH, DT_RUNPATH, DT_SONAME};
use goblin::elf::header::{ELFCLASS32, ELFCLASS64};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Addressing width of an ELF binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    X32,
    X64,
}

impl Width {
    /// Map an `EI_CLASS` byte to a width
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            ELFCLASS32 => Some(Width::X32),
            ELFCLASS64 => Some(Width::X64),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Width::X32 => 32,
            Width::X64 => 64,
        }
    }

    /// Size in bytes of one `(tag, value)` entry of the dynamic section
    pub fn dyn_entry_size(self) -> usize {
        match self {
            Width::X32 => 8,
            Width::X64 => 16,
        }
    }
}

impl std::fmt::Display for Width {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// A dynamic section tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DynTag(pub u64);

impl DynTag {
    pub const NEEDED: DynTag = DynTag(DT_NEEDED);
    pub const SONAME: DynTag = DynTag(DT_SONAME);
    pub const RPATH: DynTag = DynTag(DT_RPATH);
    pub const RUNPATH: DynTag = DynTag(DT_RUNPATH);

    /// Whether the tag's value is an offset into the dynamic string table
    pub fn is_string_valued(self) -> bool {
        matches!(
            self,
            DynTag::NEEDED | DynTag::SONAME | DynTag::RPATH | DynTag::RUNPATH
        )
    }
}

impl std::fmt::Display for DynTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            DynTag::NEEDED => write!(f, "DT_NEEDED"),
            DynTag::SONAME => write!(f, "DT_SONAME"),
            DynTag::RPATH => write!(f, "DT_RPATH"),
            DynTag::RUNPATH => write!(f, "DT_RUNPATH"),
            DynTag(other) => write!(f, "{:#x}", other),
        }
    }
}

/// One extracted name, tied to the binary that declared it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyRecord {
    /// The library name (or other string value) read from the dynamic section
    pub library: String,
    /// The binary the name was read from
    pub source_file: PathBuf,
    pub width: Width,
}

/// Names extracted from one binary, split by width.
///
/// A single binary has exactly one width, so at most one of the lists is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dependencies {
    pub x32: Vec<String>,
    pub x64: Vec<String>,
}

impl Dependencies {
    pub fn push(&mut self, width: Width, name: String) {
        match width {
            Width::X32 => self.x32.push(name),
            Width::X64 => self.x64.push(name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x32.is_empty() && self.x64.is_empty()
    }

    pub fn len(&self) -> usize {
        self.x32.len() + self.x64.len()
    }

    /// Turn the extracted names into records attributed to `source_file`
    pub fn into_records(self, source_file: &Path) -> impl Iterator<Item = DependencyRecord> + '_ {
        let x32 = self.x32.into_iter().map(|name| (name, Width::X32));
        let x64 = self.x64.into_iter().map(|name| (name, Width::X64));
        x32.chain(x64).map(move |(library, width)| DependencyRecord {
            library,
            source_file: source_file.to_path_buf(),
            width,
        })
    }
}
