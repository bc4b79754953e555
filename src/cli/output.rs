//! Output formatting utilities for CLI.

use passcode_ga::experiment::{SettingSummary, TrialOutcome};
use passcode_ga::{Genome, RunResult};
use serde::Serialize;
use std::fmt::Write as _;

/// JSON document for `run --format json`: the run itself plus its context.
#[derive(Debug, Serialize)]
pub(super) struct JsonRunResult<'a> {
    /// Seed of the random source.
    pub(super) seed: u64,
    /// The hidden target.
    pub(super) target: String,
    /// Maximum possible fitness.
    pub(super) max_fitness: usize,
    /// The run.
    #[serde(flatten)]
    pub(super) result: &'a RunResult,
}

impl<'a> JsonRunResult<'a> {
    /// Create from a `RunResult`.
    pub(super) fn from_run_result(target: &Genome, seed: u64, result: &'a RunResult) -> Self {
        Self {
            seed,
            target: target.to_string(),
            max_fitness: target.len(),
            result,
        }
    }
}

/// Format a run result as human-readable text.
pub(super) fn format_run_text(target: &Genome, seed: u64, result: &RunResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Target Passcode (seed: {seed}):");
    let _ = writeln!(output, "  {target}");
    output.push('\n');
    output.push_str("Result:\n");
    let _ = writeln!(output, "  Found: {}", result.found());
    let _ = writeln!(output, "  Generations: {}", result.generations_used());
    let _ = writeln!(output, "  Time (sec): {:.6}", result.elapsed().as_secs_f64());
    let _ = writeln!(output, "  Best Individual: {}", result.best_individual());
    let _ = writeln!(output, "  Best Fitness: {}/{}", result.best_fitness(), target.len());

    output
}

/// One line per finished trial.
pub(super) fn format_trial_line(trial: &TrialOutcome, genome_len: usize) -> String {
    let result = &trial.result;
    format!(
        "[{}] found={} gens={} time={:.3}s best={}/{}",
        result.run_id(),
        result.found(),
        result.generations_used(),
        result.elapsed().as_secs_f64(),
        result.best_fitness(),
        genome_len
    )
}

/// One line per mutation-rate setting.
pub(super) fn format_setting_line(summary: &SettingSummary) -> String {
    match (summary.avg_generations, summary.avg_time_sec) {
        (Some(gens), Some(time)) => format!(
            "Mutation {}: success {}/{}, avg gens={gens:.1}, avg time={time:.3}s",
            summary.mutation_rate, summary.found_count, summary.trials
        ),
        _ => format!(
            "Mutation {}: success 0/{} (consider increasing max_generations or adjusting params)",
            summary.mutation_rate, summary.trials
        ),
    }
}
