use std::path::PathBuf;

use thiserror::Error;

pub type ScanResult<T> = Result<T, ScanError>;

#[derive(Debug, Error)]
pub enum ScanError {
    /// No configuration file at the requested or default location.
    #[error("Config file not found at {}: {message}", .path.display())]
    ConfigNotFound { path: PathBuf, message: String },

    #[error("Invalid config {}: {message}", .path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    GlobSyntax { pattern: String, message: String },

    /// Per-file failure. Collected into the report rather than aborting the run.
    #[error("Failed to read {}: {message}", .path.display())]
    FileRead { path: PathBuf, message: String },
}

impl ScanError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ScanError::ConfigParse { path: path.into(), message: message.into() }
    }
}
