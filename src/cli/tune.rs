//! Tune command implementation.

#![allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]

use super::output::{format_setting_line, format_trial_line};
use super::{seed_or_clock, CliError, GaArgs};
use indicatif::{ProgressBar, ProgressStyle};
use passcode_ga::experiment::{run_sweep_with_progress, ExperimentConfig};
use passcode_ga::report::{write_curves_json, write_history_csv, write_summary_csv};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Execute the tune command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or output files cannot
/// be written.
pub(crate) fn execute(
    output: PathBuf,
    rates: Vec<f64>,
    trials: usize,
    bits: usize,
    seed: Option<u64>,
    threads: Option<usize>,
    ga: &GaArgs,
    progress: bool,
) -> Result<(), CliError> {
    let config = ExperimentConfig {
        base: ga.resolve()?,
        mutation_rates: rates,
        trials_per_setting: trials,
        genome_length: bits,
        seed: seed_or_clock(seed),
    };
    config.validate()?;

    fs::create_dir_all(&output).map_err(|e| {
        CliError::new(format!("Failed to create {}: {e}", output.display()))
    })?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let pb = if progress {
        let pb = ProgressBar::new(config.total_runs() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs ({eta})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let report = run_sweep_with_progress(&config, |_| {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;
    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    println!("Target Passcode (seed: {}):", config.seed);
    println!("  {}", report.target);
    println!();

    for trial in &report.trials {
        let path = output.join(format!("convergence_{}.csv", trial.result.run_id()));
        write_history_csv(trial.result.history(), &path)?;
        println!("{}", format_trial_line(trial, report.target.len()));
    }
    println!();

    for summary in &report.summaries {
        let rate = summary.mutation_rate;
        let path = output.join(format!("curves_mutation_{rate}.json"));
        write_curves_json(&report.curves_for(rate), &path)?;
        println!("{}", format_setting_line(summary));
    }

    let summary_path = output.join("tuning_summary.csv");
    write_summary_csv(&report.summary_rows(), &summary_path)?;

    println!();
    println!("Duration: {:.2}s", start.elapsed().as_secs_f64());
    println!("Saved to {}:", output.display());
    println!("- tuning_summary.csv (tuning results)");
    println!("- convergence_*.csv (per-run convergence histories)");
    println!("- curves_mutation_*.json (convergence curves)");

    Ok(())
}
