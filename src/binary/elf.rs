//! Minimal ELF reader
//!
//! Exposes just enough of the format for dependency extraction: the header
//! (width and byte order), the section header table, raw section bytes and
//! string lookups. It knows nothing about dynamic tags.

use super::common::Width;
use goblin::container::Ctx;
use goblin::elf::header::{
    EI_CLASS, EI_DATA, EI_VERSION, ELFDATA2LSB, ELFDATA2MSB, ELFMAG, SIZEOF_IDENT,
};
use goblin::elf::section_header::{SectionHeader, SHN_XINDEX, SHT_NOBITS};
use goblin::elf::Elf;
use thiserror::Error;

const EV_CURRENT: u8 = 1;

/// Structural problems found while reading an ELF file
#[derive(Debug, Error)]
pub enum ElfError {
    #[error("bad magic number")]
    BadMagic,

    #[error("file is too short for an ELF header")]
    Truncated,

    #[error("unknown ELF class {0}")]
    UnknownClass(u8),

    #[error("unknown ELF data encoding {0}")]
    UnknownByteOrder(u8),

    #[error("unknown ELF version {0}")]
    UnknownVersion(u32),

    #[error("section header table offset is zero but {0} sections are declared")]
    MissingSectionTable(u16),

    #[error("invalid section name table index {0}")]
    InvalidShstrndx(usize),

    #[error("section has invalid string table link {0}")]
    InvalidLink(u32),

    #[error("section {0} data lies outside the file")]
    SectionOutOfBounds(usize),

    #[error(transparent)]
    Parse(#[from] goblin::error::Error),
}

/// A parsed ELF file backed by its full contents
#[derive(Debug)]
pub struct ElfReader {
    data: Vec<u8>,
    width: Width,
    little_endian: bool,
    sections: Vec<SectionHeader>,
}

impl ElfReader {
    /// Parse the header and section header table
    pub fn parse(data: Vec<u8>) -> Result<Self, ElfError> {
        if !data.starts_with(ELFMAG) {
            return Err(ElfError::BadMagic);
        }
        if data.len() < SIZEOF_IDENT {
            return Err(ElfError::Truncated);
        }

        let width = Width::from_class(data[EI_CLASS])
            .ok_or(ElfError::UnknownClass(data[EI_CLASS]))?;
        let little_endian = match data[EI_DATA] {
            ELFDATA2LSB => true,
            ELFDATA2MSB => false,
            other => return Err(ElfError::UnknownByteOrder(other)),
        };
        if data[EI_VERSION] != EV_CURRENT {
            return Err(ElfError::UnknownVersion(u32::from(data[EI_VERSION])));
        }

        let header = Elf::parse_header(&data)?;
        if header.e_version != u32::from(EV_CURRENT) {
            return Err(ElfError::UnknownVersion(header.e_version));
        }
        // goblin reads a zero offset as "no sections at all"
        if header.e_shoff == 0 && header.e_shnum != 0 {
            return Err(ElfError::MissingSectionTable(header.e_shnum));
        }

        let ctx = Ctx::new(header.container()?, header.endianness()?);
        let sections = SectionHeader::parse(
            &data,
            header.e_shoff as usize,
            header.e_shnum as usize,
            ctx,
        )?;

        // SHN_XINDEX moves the real index into the null section's sh_link
        let shstrndx = match u32::from(header.e_shstrndx) {
            SHN_XINDEX => sections.first().map_or(0, |s| s.sh_link as usize),
            index => index as usize,
        };
        if !sections.is_empty() && shstrndx >= sections.len() {
            return Err(ElfError::InvalidShstrndx(shstrndx));
        }

        Ok(Self {
            data,
            width,
            little_endian,
            sections,
        })
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn sections(&self) -> &[SectionHeader] {
        &self.sections
    }

    /// Index of the first section with the given `sh_type`
    pub fn section_by_type(&self, sh_type: u32) -> Option<usize> {
        self.sections.iter().position(|s| s.sh_type == sh_type)
    }

    /// Raw bytes of section `index`; `SHT_NOBITS` sections have none
    pub fn section_data(&self, index: usize) -> Result<&[u8], ElfError> {
        let section = self
            .sections
            .get(index)
            .ok_or(ElfError::SectionOutOfBounds(index))?;
        if section.sh_type == SHT_NOBITS {
            return Ok(&[]);
        }

        let start = usize::try_from(section.sh_offset)
            .map_err(|_| ElfError::SectionOutOfBounds(index))?;
        let size =
            usize::try_from(section.sh_size).map_err(|_| ElfError::SectionOutOfBounds(index))?;
        start
            .checked_add(size)
            .and_then(|end| self.data.get(start..end))
            .ok_or(ElfError::SectionOutOfBounds(index))
    }

    /// Bytes of the string table a section links to
    pub fn string_table(&self, link: u32) -> Result<&[u8], ElfError> {
        let index = link as usize;
        if link == 0 || index >= self.sections.len() {
            return Err(ElfError::InvalidLink(link));
        }
        self.section_data(index)
    }

    /// Decode an unsigned field of 4 or 8 bytes in the file's byte order
    pub fn read_uint(&self, bytes: &[u8]) -> u64 {
        let fold = |acc: u64, byte: &u8| (acc << 8) | u64::from(*byte);
        if self.little_endian {
            bytes.iter().rev().fold(0, fold)
        } else {
            bytes.iter().fold(0, fold)
        }
    }
}

/// Resolve the NUL-terminated string starting at `offset`.
///
/// Returns `None` when the offset is outside the table or no terminator
/// follows it.
pub fn string_at(table: &[u8], offset: u64) -> Option<&[u8]> {
    let start = usize::try_from(offset).ok()?;
    let rest = table.get(start..)?;
    let len = rest.iter().position(|&b| b == 0)?;
    Some(&rest[..len])
}
