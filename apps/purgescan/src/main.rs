use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use log::{debug, info, warn};
use purgescan_extract::{Config, OutputFormat};
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "purgescan")]
#[command(about = "Collect the tokens a CSS purge step should keep", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract used tokens from the configured content files
    Extract(ExtractArgs),
    /// List the content files the config resolves to
    Files(Config),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    #[command(flatten)]
    config: Config,

    /// Exit with a non-zero status when a content file cannot be read
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Extract(ExtractArgs { config: mut cfg, strict }) => {
            cfg.initialize()?;
            let num_threads = rayon::current_num_threads();
            info!("Running token extraction (using {} threads)", num_threads);
            debug!("Config: root={:?}, config={:?}", cfg.root, cfg.config);

            let report = purgescan_extract::run_extraction(&cfg)?;
            debug!("Found {} read failures", report.failures.len());

            purgescan_extract::print_report(&mut stdout, &report, &cfg)?;
            stdout.flush()?;

            // stdout carries only the tokens
            let mut stderr = std::io::stderr();
            if cfg.format == OutputFormat::Text {
                purgescan_extract::print_failures(&mut stderr, &report.failures, &cfg)?;
                let elapsed_ms = start.elapsed().as_millis();
                writeln!(
                    stderr,
                    "\n{} Finished in {}ms on {} files (using {} threads).",
                    "●".bright_blue(),
                    elapsed_ms.to_string().cyan(),
                    report.files_scanned.to_string().cyan(),
                    num_threads.to_string().cyan()
                )?;
            }

            if strict && !report.failures.is_empty() {
                warn!("{} content files could not be read", report.failures.len());
                // Non-zero exit to fail CI
                std::process::exit(1);
            }

            Ok(())
        }
        Commands::Files(mut cfg) => {
            cfg.initialize()?;
            let files = purgescan_extract::list_content_files(&cfg)?;
            info!("Resolved {} content files", files.len());

            purgescan_extract::print_files(&mut stdout, &files, &cfg)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
