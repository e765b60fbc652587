//! Core of purgescan: the content contract of a CSS purge step.
//!
//! This crate provides:
//! - Loading and validating the purge configuration (`content` globs and the
//!   `defaultExtractor` rule)
//! - Resolving content globs into an ordered, deduplicated file list
//! - Extracting candidate tokens (class names, identifiers) from those files
//!
//! # Examples
//!
//! ```no_run
//! use purgescan_core::{Config, extract_tokens, resolve_content};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), purgescan_core::ScanError> {
//! let cfg = Config::new(vec!["./src/index.html".into(), "./src/**/*.elm".into()])?;
//! let files = resolve_content(Path::new("."), cfg.content(), cfg.skipped_content_globs())?;
//! let report = extract_tokens(&cfg, &files);
//! println!("{} tokens", report.tokens.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod constants;
mod error;
mod extractor;
mod invoker;
mod resolver;
mod types;

// Re-export public API
pub use config::{Config, ExtensionExtractor, find_config, load_config, parse_config};
pub use constants::{DEFAULT_CONFIG_FILE, DEFAULT_TOKEN_PATTERN};
pub use error::{ScanError, ScanResult};
pub use extractor::{CustomExtractor, DefaultExtractor, Extractor, ExtractorKind};
pub use invoker::{extract_file, extract_tokens};
pub use resolver::resolve_content;
pub use types::{ExtractionReport, FileReadFailure, TokenSet};
