//! Shared helpers for the end-to-end tests

use std::fs;
use std::path::{Path, PathBuf};

/// Build a little-endian ELF file with a `.dynstr` and a `.dynamic` section
/// holding one `DT_NEEDED` entry per library.
///
/// The library's `ElfBuilder` is compiled only for unit tests and cannot be
/// reached from here, so the end-to-end tests carry this smaller variant with
/// just the layout they run the binary over.
pub fn elf_with_needed(is_64: bool, libraries: &[&str]) -> Vec<u8> {
    let word = if is_64 { 8 } else { 4 };
    let (ehsize, shentsize) = if is_64 { (64, 64) } else { (52, 40) };

    let mut dynstr = vec![0u8];
    let mut dynamic = Vec::new();
    for lib in libraries {
        let offset = dynstr.len() as u64;
        dynstr.extend_from_slice(lib.as_bytes());
        dynstr.push(0);
        put(&mut dynamic, 1, word);
        put(&mut dynamic, offset, word);
    }

    let dynstr_offset = ehsize;
    let dynamic_offset = dynstr_offset + dynstr.len();
    let shoff = (dynamic_offset + dynamic.len() + 7) / 8 * 8;

    let mut out = b"\x7fELF".to_vec();
    out.extend_from_slice(&[if is_64 { 2 } else { 1 }, 1, 1]);
    out.resize(16, 0);
    put(&mut out, 3, 2); // e_type
    put(&mut out, 62, 2); // e_machine
    put(&mut out, 1, 4); // e_version
    put(&mut out, 0, word); // e_entry
    put(&mut out, 0, word); // e_phoff
    put(&mut out, shoff as u64, word);
    put(&mut out, 0, 4); // e_flags
    put(&mut out, ehsize as u64, 2);
    put(&mut out, 0, 2);
    put(&mut out, 0, 2);
    put(&mut out, shentsize as u64, 2);
    put(&mut out, 3, 2); // e_shnum
    put(&mut out, 0, 2); // e_shstrndx

    out.extend_from_slice(&dynstr);
    out.extend_from_slice(&dynamic);
    out.resize(shoff, 0);

    let sections = [
        (0u64, 0usize, 0usize, 0u64),
        (3, dynstr_offset, dynstr.len(), 0),
        (6, dynamic_offset, dynamic.len(), 1),
    ];
    for (sh_type, offset, size, link) in sections {
        put(&mut out, 0, 4); // sh_name
        put(&mut out, sh_type, 4);
        put(&mut out, 0, word); // sh_flags
        put(&mut out, 0, word); // sh_addr
        put(&mut out, offset as u64, word);
        put(&mut out, size as u64, word);
        put(&mut out, link, 4);
        put(&mut out, 0, 4); // sh_info
        put(&mut out, 1, word); // sh_addralign
        put(&mut out, 0, word); // sh_entsize
    }
    out
}

fn put(out: &mut Vec<u8>, value: u64, size: usize) {
    out.extend_from_slice(&value.to_le_bytes()[..size]);
}

/// Write `data` to `root/name`, creating parent directories
pub fn write_file(root: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, data).unwrap();
    path
}
