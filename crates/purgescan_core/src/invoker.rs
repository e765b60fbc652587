use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    thread,
};

use crate::{
    config::Config,
    error::{ScanError, ScanResult},
    extractor::Extractor,
    types::{ExtractionReport, FileReadFailure},
};

/// Read one file and run the extractor configured for it.
pub fn extract_file(cfg: &Config, file: &Path) -> ScanResult<Vec<String>> {
    trace!("Reading content file: {}", file.display());
    let text = fs::read_to_string(file)
        .map_err(|e| ScanError::FileRead { path: file.to_path_buf(), message: e.to_string() })?;
    let tokens = cfg.extractor_for(file).extract(&text);
    debug!("Extracted {} tokens from {}", tokens.len(), file.display());
    Ok(tokens)
}

/// Extract tokens from every file, in parallel, merging in `files` order.
///
/// A file that cannot be read is recorded in `failures` and skipped.
pub fn extract_tokens(cfg: &Config, files: &[PathBuf]) -> ExtractionReport {
    info!("Extracting tokens from {} files", files.len());

    let outcomes: Vec<ScanResult<Vec<String>>> = files
        .par_iter()
        .map(|file| {
            trace!("Thread {:?} processing: {}", thread::current().id(), file.display());
            extract_file(cfg, file)
        })
        .collect();

    let mut report = ExtractionReport::default();
    for (file, outcome) in files.iter().zip(outcomes) {
        match outcome {
            Ok(tokens) => {
                report.files_scanned += 1;
                report.tokens.extend(tokens);
            }
            Err(err) => {
                let message = match err {
                    ScanError::FileRead { message, .. } => message,
                    other => other.to_string(),
                };
                warn!("Skipping {}: {}", file.display(), message);
                report.failures.push(FileReadFailure { path: file.clone(), message });
            }
        }
    }

    info!(
        "Extracted {} unique tokens from {} files ({} failed)",
        report.tokens.len(),
        report.files_scanned,
        report.failures.len()
    );
    report
}
