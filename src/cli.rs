//! CLI module for bldd
//!
//! This module provides the command-line interface functionality including
//! argument parsing and output formatting.

pub mod args;
pub mod output;

pub use args::{Args, OutputFormat, TagArg};
pub use output::{Color, OutputFormatter};

use crate::scan::Scanner;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, IsTerminal, Write};
use tracing::info;

/// Main CLI application runner
pub struct CliApp {
    args: Args,
}

impl CliApp {
    /// Create a new CLI application with parsed arguments
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Scan the requested paths and write the report
    pub async fn run(&self) -> Result<i32> {
        let scanner = Scanner::new(self.args.scan_config());
        let report = scanner.scan(self.args.paths.as_slice()).await?;

        match &self.args.output {
            Some(path) => {
                let formatter = OutputFormatter::new(self.args.format, false);
                let mut rendered = Vec::new();
                formatter.write_report(&mut rendered, &report.result)?;
                fs::write(path, rendered)
                    .with_context(|| format!("Failed to write report to '{}'", path.display()))?;
                info!("report written to {}", path.display());
            }
            None => {
                let stdout = io::stdout();
                let use_color = !self.args.no_color && stdout.is_terminal();
                let formatter = OutputFormatter::new(self.args.format, use_color);
                let mut out = stdout.lock();
                formatter.write_report(&mut out, &report.result)?;
                writeln!(out)?;
            }
        }

        Ok(0)
    }
}
