//! Integration tests for the sweep driver and file output.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use passcode_ga::experiment::{run_sweep, ExperimentConfig};
use passcode_ga::ga::GaConfig;
use passcode_ga::report::{
    write_curves_json, write_history_csv, write_summary_csv, HISTORY_HEADER, SUMMARY_HEADER,
};
use std::fs;

fn sweep_config() -> ExperimentConfig {
    ExperimentConfig {
        base: GaConfig {
            population_size: 40,
            max_generations: 400,
            ..GaConfig::default()
        },
        mutation_rates: vec![0.02, 0.05],
        trials_per_setting: 2,
        genome_length: 16,
        seed: 1234,
    }
}

#[test]
fn test_history_file_matches_run() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_sweep(&sweep_config()).unwrap();
    let trial = &report.trials[0];

    let path = dir.path().join(format!("convergence_{}.csv", trial.result.run_id()));
    write_history_csv(trial.result.history(), &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(HISTORY_HEADER));
    assert_eq!(lines.count(), trial.result.history().len());
    assert!(path.ends_with("convergence_mr_0.02_trial_1.csv"));
}

#[test]
fn test_summary_file_has_one_row_per_trial() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_sweep(&sweep_config()).unwrap();

    let path = dir.path().join("tuning_summary.csv");
    write_summary_csv(&report.summary_rows(), &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], SUMMARY_HEADER);
    assert_eq!(lines.len(), 1 + 4);
    assert!(lines[1].starts_with("mutation_rate=0.02,1,"));
    assert!(lines[4].starts_with("mutation_rate=0.05,2,"));
}

#[test]
fn test_curves_file_is_valid_json() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_sweep(&sweep_config()).unwrap();

    let path = dir.path().join("curves_mutation_0.05.json");
    write_curves_json(&report.curves_for(0.05), &path).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["max_fitness"], 16);
    assert_eq!(value["curves"][0]["label"], "mutation=0.05");
    let best = value["curves"][0]["best_fitness"].as_array().unwrap();
    assert!(!best.is_empty());
}

#[test]
fn test_summaries_count_successes() {
    let report = run_sweep(&sweep_config()).unwrap();

    for summary in &report.summaries {
        let found = report
            .trials_for(summary.mutation_rate)
            .filter(|t| t.result.found())
            .count();
        assert_eq!(summary.found_count, found);
        assert_eq!(summary.trials, 2);
        assert_eq!(summary.avg_generations.is_some(), found > 0);
    }
}

#[test]
fn test_write_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("history.csv");
    assert!(write_history_csv(&[], &path).is_err());
}
