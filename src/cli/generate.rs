//! Generate command implementation.

use super::output::format_report_text;
use super::{resolve_seed, CliError, OutputFormat};
use horde::{generate_horde, run_with_deadline, JsonLinesSink, QualityLog, QualitySink, Scenario};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be loaded, the request is
/// rejected, or the quality log cannot be written.
pub(crate) fn execute(
    scenario_path: &Path,
    seed: Option<u64>,
    format: OutputFormat,
    quality_log: Option<PathBuf>,
    round: Option<u32>,
    timeout_ms: Option<u64>,
) -> Result<(), CliError> {
    let scenario = Scenario::load(scenario_path).map_err(|e| {
        CliError::new(format!("Failed to load {}: {e}", scenario_path.display()))
    })?;
    let round = round.unwrap_or_else(|| scenario.round());
    let request = scenario.into_request();
    let seed = resolve_seed(seed);

    let report = match timeout_ms {
        Some(ms) => run_with_deadline(request, seed, Duration::from_millis(ms))?,
        None => {
            let mut rng = SmallRng::seed_from_u64(seed);
            generate_horde(&request, &mut rng)?
        }
    };

    if let Some(path) = quality_log {
        let mut sink = JsonLinesSink::append(&path).map_err(|e| {
            CliError::new(format!("Failed to open {}: {e}", path.display()))
        })?;
        sink.record(&QualityLog::from_report(&report, round))?;
    }

    match format {
        OutputFormat::Text => print!("{}", format_report_text(&report, seed)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}
