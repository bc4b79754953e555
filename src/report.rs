//! Output collaborators for finished runs.
//!
//! These run strictly after evolution completes: per-run convergence
//! histories and sweep summaries are written as CSV, and convergence curves
//! are exported as JSON for an external plotter.

use crate::error::ReportError;
use crate::ga::{GenerationRecord, RunResult};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Header row of a convergence history file.
pub const HISTORY_HEADER: &str = "generation,best_fitness,avg_fitness";

/// Header row of a tuning summary file.
pub const SUMMARY_HEADER: &str = "setting,trial,found,generations,time_sec";

/// Render a history as CSV, averages to four decimals.
#[must_use]
pub fn format_history_csv(history: &[GenerationRecord]) -> String {
    let mut output = String::with_capacity(32 * (history.len() + 1));
    output.push_str(HISTORY_HEADER);
    output.push('\n');
    for record in history {
        let _ = writeln!(
            output,
            "{},{},{:.4}",
            record.generation, record.best_fitness, record.average_fitness
        );
    }
    output
}

/// Write a history CSV to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_history_csv(history: &[GenerationRecord], path: &Path) -> Result<(), ReportError> {
    fs::write(path, format_history_csv(history))?;
    Ok(())
}

/// One line of the tuning summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Mutation rate of the setting.
    pub mutation_rate: f64,
    /// One-based trial number within the setting.
    pub trial: usize,
    /// Whether the run matched the target.
    pub found: bool,
    /// Generations used by the run.
    pub generations: usize,
    /// Wall-clock seconds.
    pub time_sec: f64,
}

impl SummaryRow {
    /// Summarize a finished run.
    #[must_use]
    pub fn from_result(mutation_rate: f64, trial: usize, result: &RunResult) -> Self {
        Self {
            mutation_rate,
            trial,
            found: result.found(),
            generations: result.generations_used(),
            time_sec: result.elapsed().as_secs_f64(),
        }
    }
}

/// Render summary rows as CSV.
#[must_use]
pub fn format_summary_csv(rows: &[SummaryRow]) -> String {
    let mut output = String::new();
    output.push_str(SUMMARY_HEADER);
    output.push('\n');
    for row in rows {
        let _ = writeln!(
            output,
            "mutation_rate={},{},{},{},{:.6}",
            row.mutation_rate, row.trial, row.found, row.generations, row.time_sec
        );
    }
    output
}

/// Write a summary CSV to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_summary_csv(rows: &[SummaryRow], path: &Path) -> Result<(), ReportError> {
    fs::write(path, format_summary_csv(rows))?;
    Ok(())
}

/// A labelled best-fitness curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    /// Legend label.
    pub label: String,
    /// Generation indices (x axis).
    pub generations: Vec<usize>,
    /// Best fitness per generation (y axis).
    pub best_fitness: Vec<usize>,
}

/// Ordered collection of curves sharing one plot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConvergenceCurves {
    /// Upper bound of the y axis (the genome length).
    pub max_fitness: usize,
    /// Curves in insertion order.
    pub curves: Vec<Curve>,
}

impl ConvergenceCurves {
    /// Create an empty plot for genomes of `max_fitness` bits.
    #[must_use]
    pub fn new(max_fitness: usize) -> Self {
        Self {
            max_fitness,
            curves: Vec::new(),
        }
    }

    /// Add the best-fitness curve of `history` under `label`.
    pub fn add(&mut self, label: impl Into<String>, history: &[GenerationRecord]) {
        self.curves.push(Curve {
            label: label.into(),
            generations: history.iter().map(|r| r.generation).collect(),
            best_fitness: history.iter().map(|r| r.best_fitness).collect(),
        });
    }

    /// Number of curves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether no curve has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

/// Write curves as pretty JSON to `path`.
///
/// # Errors
///
/// Returns an error if serialization or file I/O fails.
pub fn write_curves_json(curves: &ConvergenceCurves, path: &Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(curves)?;
    fs::write(path, json)?;
    Ok(())
}
