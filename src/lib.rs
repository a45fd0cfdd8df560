//! bldd - backward ldd
//!
//! A library for finding which ELF executables depend on which shared libraries.
//! It classifies candidate files by magic number, reads the `DT_NEEDED` entries
//! (or another string-valued dynamic tag) straight from each binary's dynamic
//! section, and ranks libraries per word size by how many binaries use them.

pub mod aggregate;
pub mod binary;
pub mod cli;
pub mod config;
pub mod error;
pub mod scan;

// Re-export main types for convenience
pub use aggregate::{aggregate, Aggregator, LibraryAggregate, RankedResult};
pub use binary::{
    extract_dependencies, extract_dyn_strings, is_target_binary, Dependencies, DependencyRecord,
    DynTag, Width,
};
pub use cli::{Args, CliApp, OutputFormat};
pub use config::ScanConfig;
pub use error::{Error, Result};
pub use scan::{ScanReport, Scanner};
