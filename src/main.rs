//! Horde CLI - generate balanced enemy waves from scenario files.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Horde - a balancing engine for tower-defense waves
#[derive(Parser, Debug)]
#[command(name = "horde")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print per-generation search progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate one horde for a scenario
    Generate {
        /// Scenario JSON file
        #[arg(required = true)]
        scenario: PathBuf,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Append a quality record to this JSON-lines file
        #[arg(long)]
        quality_log: Option<PathBuf>,

        /// Round recorded in the quality log (default: scenario progression)
        #[arg(short, long)]
        round: Option<u32>,

        /// Stop the search after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Generate many hordes in parallel and aggregate statistics
    Batch {
        /// Scenario JSON file
        #[arg(required = true)]
        scenario: PathBuf,

        /// Number of hordes to generate (default: 100)
        #[arg(short = 'n', long, default_value = "100")]
        runs: u64,

        /// Starting seed (increments for each run)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    horde::logging::init(args.verbose);

    let result = match args.command {
        Commands::Generate {
            scenario,
            seed,
            format,
            quality_log,
            round,
            timeout_ms,
        } => cli::generate::execute(&scenario, seed, format, quality_log, round, timeout_ms),

        Commands::Batch {
            scenario,
            runs,
            seed,
            threads,
            format,
            progress,
        } => cli::batch::execute(&scenario, runs, seed, threads, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
