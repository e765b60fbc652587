use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::PathBuf;

use purgescan_core::{
    Config as PurgeConfig, ExtractionReport, extract_tokens, find_config, load_config,
    resolve_content,
};

use crate::config::Config;

/// Load the purge config and resolve its content globs. Expects an
/// initialized [`Config`].
pub fn list_content_files(cfg: &Config) -> Result<Vec<PathBuf>> {
    let (_, files) = load_and_resolve(cfg)?;
    Ok(files)
}

/// Run one extraction: load config, resolve content, extract tokens.
///
/// Config and glob errors abort; unreadable files end up in
/// [`ExtractionReport::failures`].
pub fn run_extraction(cfg: &Config) -> Result<ExtractionReport> {
    info!("Starting token extraction");
    let (purge, files) = load_and_resolve(cfg)?;
    info!("Found {} content files", files.len());

    let report = extract_tokens(&purge, &files);
    info!("Token extraction complete. Found {} tokens", report.tokens.len());
    Ok(report)
}

fn load_and_resolve(cfg: &Config) -> Result<(PurgeConfig, Vec<PathBuf>)> {
    let root = cfg.root()?;
    let config_path = find_config(cfg.config.as_deref(), root);
    let purge = load_config(&config_path)?;
    info!("Loaded config from {}", config_path.display());

    debug!("Resolving content globs: {:?}", purge.content());
    let files = resolve_content(root, purge.content(), purge.skipped_content_globs())
        .with_context(|| format!("Failed to resolve content of {}", config_path.display()))?;
    if files.is_empty() {
        warn!("Content globs matched no files under {}", root.display());
    }
    Ok((purge, files))
}
