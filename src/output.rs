//! Rendering of result sets and clause dumps.

use std::io::Write;

use csvql_core::{ClauseNode, ResultSet};

use crate::config::{OutputConfig, OutputFormat};
use crate::error::CliResult;

/// How `--ast` prints the parsed clauses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AstFormat {
    #[default]
    Text,
    Json,
}

/// Write a result set, header row first.
pub fn render<W: Write>(result: &ResultSet, output: &OutputConfig, out: &mut W) -> CliResult<()> {
    match output.format {
        OutputFormat::Text => {
            for line in result.lines() {
                writeln!(out, "{}", line.join(output.separator.as_str()))?;
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for line in result.lines() {
                writer.write_record(line)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

/// Write the parsed clause list for diagnostics.
pub fn render_ast<W: Write>(clauses: &[ClauseNode], format: AstFormat, out: &mut W) -> CliResult<()> {
    match format {
        AstFormat::Text => {
            writeln!(out, "Abstract Syntax Tree:")?;
            for clause in clauses {
                writeln!(out, "{:?}", clause)?;
            }
        }
        AstFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, clauses)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
