//! CLI argument parsing module
//!
//! This module defines the command-line interface for bldd.

use crate::binary::DynTag;
use crate::config::ScanConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// bldd (backward ldd) - show the executables that use a shared library
#[derive(Parser, Debug)]
#[command(name = "bldd")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Show all ELF executables that use each shared library")]
#[command(long_about = r#"
bldd (backward ldd) scans files and directories for ELF binaries, reads the
shared libraries each one requires from its dynamic section, and lists every
library together with the executables that use it, most used first. 32-bit
and 64-bit binaries are reported separately.

Examples:
  bldd /usr/bin                        # Which libraries do the tools in /usr/bin use?
  bldd -f json -o libs.json /usr/lib   # Write the report as JSON
  bldd --tag runpath /opt              # Group binaries by DT_RUNPATH instead
"#)]
pub struct Args {
    /// Files or directories to scan
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Txt)]
    pub format: OutputFormat,

    /// Dynamic section entry to group binaries by
    #[arg(short = 't', long, value_enum, default_value_t = TagArg::Needed)]
    pub tag: TagArg,

    /// Number of files inspected in parallel (defaults to the number of CPUs)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Warn about malformed ELF files and keep going instead of failing
    #[arg(long)]
    pub skip_malformed: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Suppress colored output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

impl Args {
    /// Build the scan configuration these arguments describe
    pub fn scan_config(&self) -> ScanConfig {
        let config = ScanConfig::default()
            .with_tag(self.tag.into())
            .with_skip_malformed(self.skip_malformed);
        match self.jobs {
            Some(jobs) => config.with_jobs(jobs),
            None => config,
        }
    }
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text grouped by architecture (default)
    Txt,
    /// JSON output
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Txt => write!(f, "txt"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// String-valued dynamic tags selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagArg {
    /// DT_NEEDED: required shared libraries
    Needed,
    /// DT_SONAME: the library's own name
    Soname,
    /// DT_RPATH: legacy library search path
    Rpath,
    /// DT_RUNPATH: library search path
    Runpath,
}

impl From<TagArg> for DynTag {
    fn from(tag: TagArg) -> Self {
        match tag {
            TagArg::Needed => DynTag::NEEDED,
            TagArg::Soname => DynTag::SONAME,
            TagArg::Rpath => DynTag::RPATH,
            TagArg::Runpath => DynTag::RUNPATH,
        }
    }
}
