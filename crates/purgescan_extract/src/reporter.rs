use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;
use log::{debug, trace};
use serde::Serialize;

use purgescan_core::{ExtractionReport, FileReadFailure};

use crate::config::{Config, OutputFormat};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    tokens: &'a [String],
    files_scanned: usize,
    failures: Vec<JsonFailure<'a>>,
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    path: String,
    message: &'a str,
}

/// Path shown to the user: relative to the root when it lives under it
fn display_path(root: Option<&Path>, path: &Path) -> String {
    match root.and_then(|r| path.strip_prefix(r).ok()) {
        Some(rel) => rel.to_string_lossy().to_string(),
        None => path.to_string_lossy().to_string(),
    }
}

pub fn print_report<W: Write>(
    writer: &mut W,
    report: &ExtractionReport,
    cfg: &Config,
) -> io::Result<()> {
    debug!("Printing {} tokens as {:?}", report.tokens.len(), cfg.format);
    let root = cfg.root.as_deref();

    match cfg.format {
        OutputFormat::Json => {
            let json = JsonReport {
                tokens: report.tokens.as_slice(),
                files_scanned: report.files_scanned,
                failures: report
                    .failures
                    .iter()
                    .map(|f| JsonFailure {
                        path: display_path(root, &f.path),
                        message: &f.message,
                    })
                    .collect(),
            };
            serde_json::to_writer_pretty(&mut *writer, &json)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            for token in report.tokens.iter() {
                writeln!(writer, "{}", token)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// Warn about unreadable content files. Prints nothing when all files were read.
pub fn print_failures<W: Write>(
    writer: &mut W,
    failures: &[FileReadFailure],
    cfg: &Config,
) -> io::Result<()> {
    if failures.is_empty() {
        return Ok(());
    }
    let root = cfg.root.as_deref();

    writeln!(
        writer,
        "{} {} content files could not be read",
        "⚠".yellow().bold(),
        failures.len().to_string().yellow()
    )?;
    for (idx, failure) in failures.iter().enumerate() {
        let prefix = if idx == failures.len() - 1 { "└──" } else { "├──" };
        trace!("Reporting failure for {}", failure.path.display());
        writeln!(
            writer,
            "{}  {} ({})",
            prefix.dimmed(),
            display_path(root, &failure.path).blue(),
            failure.message.red()
        )?;
    }
    writer.flush()?;
    Ok(())
}

pub fn print_files<W: Write>(writer: &mut W, files: &[PathBuf], cfg: &Config) -> io::Result<()> {
    debug!("Printing {} content files", files.len());
    let root = cfg.root.as_deref();
    let shown: Vec<String> = files.iter().map(|f| display_path(root, f)).collect();

    match cfg.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &shown)?;
            writeln!(writer)?;
        }
        OutputFormat::Text => {
            for f in &shown {
                writeln!(writer, "{}", f)?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}
