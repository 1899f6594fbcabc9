//! Batch command implementation.

use super::output::{format_batch_text, BatchStats};
use super::{resolve_seed, CliError, OutputFormat};
use horde::{generate_horde, Scenario};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

/// Execute the batch command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded or output fails.
pub(crate) fn execute(
    scenario_path: &Path,
    runs: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    format: OutputFormat,
    progress: bool,
) -> Result<(), CliError> {
    let scenario = Scenario::load(scenario_path).map_err(|e| {
        CliError::new(format!("Failed to load {}: {e}", scenario_path.display()))
    })?;
    let request = scenario.into_request();

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = resolve_seed(seed);

    let pb = if progress {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} hordes ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        let pb = ProgressBar::new(runs);
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each thread folds into its own stats; merged once at the end
    let stats = (0..runs)
        .into_par_iter()
        .fold(BatchStats::default, |mut local, i| {
            let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(i));
            match generate_horde(&request, &mut rng) {
                Ok(report) => local.add_report(&report),
                Err(e) => {
                    log::warn!("run {i} failed: {e}");
                    local.errors += 1;
                }
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(BatchStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_batch_text(&stats, base_seed));
            println!();
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats.summary(base_seed))?);
        }
    }

    Ok(())
}
