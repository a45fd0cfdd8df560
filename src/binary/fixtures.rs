//! Synthetic ELF images for unit tests

use super::common::{DynTag, Width};
use goblin::elf::header::{ELFCLASS32, ELFCLASS64, ELFDATA2LSB, ELFDATA2MSB, ELFMAG};
use goblin::elf::section_header::{SHT_DYNAMIC, SHT_STRTAB};

const ET_DYN: u16 = 3;
const EV_CURRENT: u8 = 1;

/// Builds a minimal ELF file: null section, `.dynstr`, and optionally `.dynamic`.
pub struct ElfBuilder {
    width: Width,
    little_endian: bool,
    dynstr: Vec<u8>,
    entries: Vec<(u64, u64)>,
    with_dynamic: bool,
    dynamic_link: u32,
    trailing_bytes: usize,
}

impl ElfBuilder {
    pub fn new(width: Width) -> Self {
        Self {
            width,
            little_endian: true,
            dynstr: vec![0],
            entries: Vec::new(),
            with_dynamic: true,
            dynamic_link: 1,
            trailing_bytes: 0,
        }
    }

    pub fn big_endian(mut self) -> Self {
        self.little_endian = false;
        self
    }

    /// Add a string-valued entry whose value points at a freshly appended string
    pub fn string_entry(mut self, tag: DynTag, value: &str) -> Self {
        let offset = self.dynstr.len() as u64;
        self.dynstr.extend_from_slice(value.as_bytes());
        self.dynstr.push(0);
        self.entries.push((tag.0, offset));
        self
    }

    pub fn needed(self, name: &str) -> Self {
        self.string_entry(DynTag::NEEDED, name)
    }

    pub fn entry(mut self, tag: u64, value: u64) -> Self {
        self.entries.push((tag, value));
        self
    }

    /// Append bytes to the string table without a terminator
    pub fn unterminated(mut self, bytes: &[u8]) -> Self {
        self.dynstr.extend_from_slice(bytes);
        self
    }

    pub fn dynstr_len(&self) -> u64 {
        self.dynstr.len() as u64
    }

    pub fn without_dynamic(mut self) -> Self {
        self.with_dynamic = false;
        self
    }

    pub fn dynamic_link(mut self, link: u32) -> Self {
        self.dynamic_link = link;
        self
    }

    /// Pad the dynamic section with a partial entry
    pub fn trailing_bytes(mut self, count: usize) -> Self {
        self.trailing_bytes = count;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let (ehsize, shentsize) = match self.width {
            Width::X32 => (52usize, 40usize),
            Width::X64 => (64usize, 64usize),
        };

        let mut dynamic = Vec::new();
        for &(tag, value) in &self.entries {
            self.put_word(&mut dynamic, tag);
            self.put_word(&mut dynamic, value);
        }
        dynamic.extend(std::iter::repeat(0u8).take(self.trailing_bytes));

        let dynstr_offset = ehsize;
        let dynamic_offset = dynstr_offset + self.dynstr.len();
        let mut shoff = dynamic_offset + dynamic.len();
        shoff += (8 - shoff % 8) % 8;
        let shnum: u16 = if self.with_dynamic { 3 } else { 2 };

        let mut out = Vec::new();
        out.extend_from_slice(ELFMAG);
        out.push(match self.width {
            Width::X32 => ELFCLASS32,
            Width::X64 => ELFCLASS64,
        });
        out.push(if self.little_endian {
            ELFDATA2LSB
        } else {
            ELFDATA2MSB
        });
        out.push(EV_CURRENT);
        out.resize(16, 0);
        self.put_u16(&mut out, ET_DYN);
        self.put_u16(&mut out, 62);
        self.put_u32(&mut out, 1);
        self.put_word(&mut out, 0);
        self.put_word(&mut out, 0);
        self.put_word(&mut out, shoff as u64);
        self.put_u32(&mut out, 0);
        self.put_u16(&mut out, ehsize as u16);
        self.put_u16(&mut out, 0);
        self.put_u16(&mut out, 0);
        self.put_u16(&mut out, shentsize as u16);
        self.put_u16(&mut out, shnum);
        self.put_u16(&mut out, 0);
        assert_eq!(out.len(), ehsize);

        out.extend_from_slice(&self.dynstr);
        out.extend_from_slice(&dynamic);
        out.resize(shoff, 0);

        self.put_section(&mut out, 0, 0, 0, 0);
        self.put_section(&mut out, SHT_STRTAB, dynstr_offset, self.dynstr.len(), 0);
        if self.with_dynamic {
            self.put_section(
                &mut out,
                SHT_DYNAMIC,
                dynamic_offset,
                dynamic.len(),
                self.dynamic_link,
            );
        }
        out
    }

    fn put_section(&self, out: &mut Vec<u8>, sh_type: u32, offset: usize, size: usize, link: u32) {
        self.put_u32(out, 0);
        self.put_u32(out, sh_type);
        self.put_word(out, 0);
        self.put_word(out, 0);
        self.put_word(out, offset as u64);
        self.put_word(out, size as u64);
        self.put_u32(out, link);
        self.put_u32(out, 0);
        self.put_word(out, 1);
        let entsize = if sh_type == SHT_DYNAMIC {
            self.width.dyn_entry_size() as u64
        } else {
            0
        };
        self.put_word(out, entsize);
    }

    fn put_u16(&self, out: &mut Vec<u8>, value: u16) {
        if self.little_endian {
            out.extend_from_slice(&value.to_le_bytes());
        } else {
            out.extend_from_slice(&value.to_be_bytes());
        }
    }

    fn put_u32(&self, out: &mut Vec<u8>, value: u32) {
        if self.little_endian {
            out.extend_from_slice(&value.to_le_bytes());
        } else {
            out.extend_from_slice(&value.to_be_bytes());
        }
    }

    fn put_word(&self, out: &mut Vec<u8>, value: u64) {
        match self.width {
            Width::X32 => self.put_u32(out, value as u32),
            Width::X64 if self.little_endian => out.extend_from_slice(&value.to_le_bytes()),
            Width::X64 => out.extend_from_slice(&value.to_be_bytes()),
        }
    }
}
