//! CLI output formatting module
//!
//! Renders a ranked dependency report as grouped plain text or JSON.

use crate::aggregate::{LibraryAggregate, RankedResult};
use crate::binary::Width;
use crate::cli::args::OutputFormat;
use anyhow::Result;
use colored::*;
use std::io::Write;

/// Main output formatter that handles different formats
pub struct OutputFormatter {
    format: OutputFormat,
    use_color: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, use_color: bool) -> Self {
        Self { format, use_color }
    }

    /// Format and write a ranked report
    pub fn write_report<W: Write>(&self, writer: &mut W, result: &RankedResult) -> Result<()> {
        match self.format {
            OutputFormat::Txt => self.write_txt_output(writer, result),
            OutputFormat::Json => self.write_json_output(writer, result),
        }
    }

    fn write_txt_output<W: Write>(&self, writer: &mut W, result: &RankedResult) -> Result<()> {
        if !result.x32.is_empty() {
            self.write_group(writer, Width::X32, &result.x32)?;
            writeln!(writer)?;
        }
        if !result.x64.is_empty() {
            self.write_group(writer, Width::X64, &result.x64)?;
        }
        Ok(())
    }

    fn write_group<W: Write>(
        &self,
        writer: &mut W,
        width: Width,
        aggregates: &[LibraryAggregate],
    ) -> Result<()> {
        let title = format!("---------- {} ----------", group_title(width));
        writeln!(writer, "{}", self.colorize(&title, Color::Cyan))?;

        for aggregate in aggregates {
            writeln!(
                writer,
                "{} ({} execs)",
                self.colorize(&aggregate.library, Color::Green),
                aggregate.count
            )?;
            for file in &aggregate.files {
                writeln!(writer, "\t{}", file.display())?;
            }
        }
        Ok(())
    }

    fn write_json_output<W: Write>(&self, writer: &mut W, result: &RankedResult) -> Result<()> {
        serde_json::to_writer(&mut *writer, result)?;
        Ok(())
    }

    /// Colorize text if color output is enabled
    pub fn colorize(&self, text: &str, color: Color) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match color {
            Color::Cyan => text.cyan().bold().to_string(),
            Color::Green => text.green().to_string(),
        }
    }
}

/// Architecture label used for a width group's heading
pub fn group_title(width: Width) -> &'static str {
    match width {
        Width::X32 => "i386 (x86)",
        Width::X64 => "x86_64 (amd64)",
    }
}

/// Colors used by the text report
#[derive(Debug, Clone, Copy)]
pub enum Color {
    Cyan,
    Green,
}
