use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options shared by every subcommand that reads a purge config.
#[derive(Debug, Clone, Parser)]
#[command(name = "extract")]
pub struct Config {
    /// Path to the purge config (defaults to purgecss.config.json in the root)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory content globs are resolved against (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Config {
    /// Resolve the root directory. Safe to call more than once.
    pub fn initialize(&mut self) -> Result<()> {
        let root = match self.root.take() {
            Some(r) => {
                debug!("Using provided root directory: {:?}", r);
                r.canonicalize().unwrap_or(r)
            }
            None => {
                debug!("No root provided, using current directory");
                env::current_dir()?
            }
        };
        info!("Using root directory: {}", root.display());
        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }
}
