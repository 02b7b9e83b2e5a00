// src/main.rs
mod extractors;
mod storage;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use extractors::SectionExtractor;
use storage::{OutputFormat, StorageManager};
use utils::AppError;

/// Prints the CHANGELOG section of one version, e.g. as release notes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Version whose section is extracted, matched literally against `## [<VERSION>]`
    #[arg(value_name = "VERSION")]
    release: String,

    /// Changelog to read
    #[arg(short, long, env = "CHANGELOG_PATH", default_value = "CHANGELOG.md")]
    changelog: PathBuf,

    /// Write the section to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> ExitCode {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments (clap exits with status 2 on usage errors)
    let args = Args::parse();
    tracing::debug!("Starting extraction for args: {:?}", args);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    // Reject an empty version before the changelog is read
    let extractor = SectionExtractor::new(&args.release)?;
    tracing::debug!("Looking for section of version {}", extractor.version());

    tracing::info!("Reading changelog from {}", args.changelog.display());
    let document = std::fs::read_to_string(&args.changelog).map_err(|source| AppError::Io {
        path: args.changelog.display().to_string(),
        source,
    })?;

    let section = extractor.extract(&document)?;
    tracing::info!(
        "Extracted section for {} (lines {}-{}, {} bytes)",
        section.version,
        section.heading_line,
        section.end_line,
        section.content.len()
    );

    let storage = StorageManager::new(args.output.as_deref(), args.format)?;
    tracing::debug!("Writing {:?} output to {:?}", args.format, storage.destination());
    storage.save_section(&section)?;

    Ok(())
}
