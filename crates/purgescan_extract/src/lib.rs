//! Token extraction runs for purgescan.
//!
//! This crate wires the core pieces into one build step: it loads the purge
//! config, resolves its content globs, extracts the used tokens and renders
//! them as text or JSON.
//!
//! # Examples
//!
//! ```no_run
//! use clap::Parser;
//! use purgescan_extract::{Config, run_extraction};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut cfg = Config::parse_from(["extract", "--root", "/path/to/project"]);
//! cfg.initialize()?;
//!
//! let report = run_extraction(&cfg)?;
//!
//! // Use buffered output for better performance
//! let mut stdout = BufWriter::new(std::io::stdout());
//! purgescan_extract::print_report(&mut stdout, &report, &cfg)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod reporter;
mod runner;

// Re-export public API
pub use config::{Config, OutputFormat};
pub use purgescan_core::{ExtractionReport, FileReadFailure, ScanError};
pub use reporter::{print_failures, print_files, print_report};
pub use runner::{list_content_files, run_extraction};
