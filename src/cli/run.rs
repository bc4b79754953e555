//! Run command implementation.

#![allow(clippy::needless_pass_by_value)]

use super::output::{format_run_text, JsonRunResult};
use super::{seed_or_clock, CliError, GaArgs, OutputFormat};
use passcode_ga::ga::{run_with_recorder, Genome, HistoryRecorder, LoggingRecorder};
use passcode_ga::report::{write_curves_json, write_history_csv, ConvergenceCurves};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Identifier of the single run.
const RUN_ID: &str = "single_run";

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or output files cannot
/// be written.
pub(crate) fn execute(
    bits: usize,
    target: Option<String>,
    seed: Option<u64>,
    ga: &GaArgs,
    history: Option<PathBuf>,
    curves: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let config = ga.resolve()?;
    let seed = seed_or_clock(seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let target = match target {
        Some(text) => text
            .parse::<Genome>()
            .map_err(|e| CliError::new(format!("Invalid target: {e}")))?,
        None => Genome::random(&mut rng, bits),
    };

    let mut recorder = LoggingRecorder::new(RUN_ID, HistoryRecorder::new());
    let result = run_with_recorder(&target, &config, RUN_ID, &mut rng, &mut recorder)?;

    if let Some(path) = history {
        write_history_csv(result.history(), &path)?;
        log::info!("wrote history to {}", path.display());
    }
    if let Some(path) = curves {
        let mut plot = ConvergenceCurves::new(target.len());
        plot.add(RUN_ID, result.history());
        write_curves_json(&plot, &path)?;
        log::info!("wrote curves to {}", path.display());
    }

    match format {
        OutputFormat::Text => print!("{}", format_run_text(&target, seed, &result)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonRunResult::from_run_result(
                &target, seed, &result,
            ))?;
            println!("{json}");
        }
    }

    Ok(())
}
