//! Mutation-rate tuning sweep.
//!
//! A sweep draws one target, then runs several independent trials per
//! mutation rate. Trials share nothing but the read-only target, so they run
//! in parallel with rayon, each with its own seeded random source.

// Averages use intentional casts
#![allow(clippy::cast_precision_loss)]

use crate::error::{ConfigError, ConfigResult};
use crate::ga::{
    run_with_recorder, GaConfig, Genome, HistoryRecorder, LoggingRecorder, RunResult,
    DEFAULT_GENOME_LENGTH,
};
use crate::report::{ConvergenceCurves, SummaryRow};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Multiplier spreading consecutive run indices across the seed space.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Configuration of a tuning sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Parameters shared by every trial; `mutation_rate` is overridden.
    pub base: GaConfig,
    /// Mutation rates to compare.
    pub mutation_rates: Vec<f64>,
    /// Independent runs per mutation rate.
    pub trials_per_setting: usize,
    /// Passcode length in bits.
    pub genome_length: usize,
    /// Seed for the target and every trial.
    pub seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            base: GaConfig::default(),
            mutation_rates: vec![0.005, 0.01, 0.02, 0.05],
            trials_per_setting: 5,
            genome_length: DEFAULT_GENOME_LENGTH,
            seed: 42,
        }
    }
}

impl ExperimentConfig {
    /// Total number of runs in the sweep.
    #[must_use]
    pub fn total_runs(&self) -> usize {
        self.mutation_rates.len() * self.trials_per_setting
    }

    /// GA parameters for one mutation rate.
    #[must_use]
    pub fn setting(&self, mutation_rate: f64) -> GaConfig {
        GaConfig {
            mutation_rate,
            ..self.base
        }
    }

    /// Validate every setting before anything runs.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting's error.
    pub fn validate(&self) -> ConfigResult<()> {
        self.base.validate()?;
        if self.genome_length < 2 {
            return Err(ConfigError::GenomeTooShort(self.genome_length));
        }
        for (i, &rate) in self.mutation_rates.iter().enumerate() {
            self.setting(rate).validate()?;
            // Run ids and per-setting summaries key on the rate
            if self.mutation_rates[..i].iter().any(|&seen| same_rate(seen, rate)) {
                return Err(ConfigError::DuplicateRate(rate));
            }
        }
        Ok(())
    }
}

/// Identifier of one trial, e.g. `mr_0.01_trial_3`.
#[must_use]
pub fn run_id(mutation_rate: f64, trial: usize) -> String {
    format!("mr_{mutation_rate}_trial_{trial}")
}

/// Seed of the `index`-th random source in a sweep seeded with `base`.
///
/// Index 0 is the target; trials use 1 onward.
#[must_use]
pub fn derive_seed(base: u64, index: u64) -> u64 {
    base.wrapping_add(index).wrapping_mul(SEED_STRIDE)
}

/// One finished trial.
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    /// Mutation rate of the trial's setting.
    pub mutation_rate: f64,
    /// One-based trial number.
    pub trial: usize,
    /// The run itself.
    pub result: RunResult,
}

/// Aggregates over all trials of one mutation rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SettingSummary {
    /// Mutation rate of the setting.
    pub mutation_rate: f64,
    /// Trials run.
    pub trials: usize,
    /// Trials that matched the target.
    pub found_count: usize,
    /// Mean generations over successful trials.
    pub avg_generations: Option<f64>,
    /// Mean wall-clock seconds over successful trials.
    pub avg_time_sec: Option<f64>,
}

impl SettingSummary {
    /// Aggregate the runs of one setting.
    #[must_use]
    pub fn from_results<'a, I>(mutation_rate: f64, results: I) -> Self
    where
        I: IntoIterator<Item = &'a RunResult>,
    {
        let mut trials = 0;
        let successes: Vec<&RunResult> = results
            .into_iter()
            .inspect(|_| trials += 1)
            .filter(|r| r.found())
            .collect();

        let (avg_generations, avg_time_sec) = if successes.is_empty() {
            (None, None)
        } else {
            let n = successes.len() as f64;
            let gens: usize = successes.iter().map(|r| r.generations_used()).sum();
            let time: Duration = successes.iter().map(|r| r.elapsed()).sum();
            (Some(gens as f64 / n), Some(time.as_secs_f64() / n))
        };

        Self {
            mutation_rate,
            trials,
            found_count: successes.len(),
            avg_generations,
            avg_time_sec,
        }
    }
}

/// Everything a sweep produced, in setting then trial order.
#[derive(Debug, Clone)]
pub struct ExperimentReport {
    /// The shared target.
    pub target: Genome,
    /// Every trial.
    pub trials: Vec<TrialOutcome>,
    /// One summary per mutation rate.
    pub summaries: Vec<SettingSummary>,
}

impl ExperimentReport {
    /// Rows for the tuning summary CSV.
    #[must_use]
    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        self.trials
            .iter()
            .map(|t| SummaryRow::from_result(t.mutation_rate, t.trial, &t.result))
            .collect()
    }

    /// Trials of one mutation rate.
    pub fn trials_for(&self, mutation_rate: f64) -> impl Iterator<Item = &TrialOutcome> {
        self.trials
            .iter()
            .filter(move |t| same_rate(t.mutation_rate, mutation_rate))
    }

    /// Curve of trial 1 for `mutation_rate`, labelled `mutation=<rate>`.
    #[must_use]
    pub fn curves_for(&self, mutation_rate: f64) -> ConvergenceCurves {
        let mut curves = ConvergenceCurves::new(self.target.len());
        if let Some(first) = self.trials_for(mutation_rate).find(|t| t.trial == 1) {
            curves.add(format!("mutation={mutation_rate}"), first.result.history());
        }
        curves
    }
}

/// Run a full sweep.
///
/// # Errors
///
/// Returns a configuration error before any trial starts.
pub fn run_sweep(config: &ExperimentConfig) -> ConfigResult<ExperimentReport> {
    run_sweep_with_progress(config, |_| {})
}

/// Run a full sweep, calling `on_trial` as each trial finishes.
///
/// `on_trial` is called from worker threads in completion order.
///
/// # Errors
///
/// Returns a configuration error before any trial starts.
pub fn run_sweep_with_progress<F>(
    config: &ExperimentConfig,
    on_trial: F,
) -> ConfigResult<ExperimentReport>
where
    F: Fn(&TrialOutcome) + Sync,
{
    config.validate()?;

    let mut target_rng = SmallRng::seed_from_u64(derive_seed(config.seed, 0));
    let target = Genome::random(&mut target_rng, config.genome_length);
    log::info!(
        "sweep: {} settings x {} trials, target {target}",
        config.mutation_rates.len(),
        config.trials_per_setting
    );

    let jobs: Vec<(f64, usize)> = config
        .mutation_rates
        .iter()
        .flat_map(|&rate| (1..=config.trials_per_setting).map(move |trial| (rate, trial)))
        .collect();

    // Indexed collect keeps job order regardless of scheduling
    let trials = jobs
        .par_iter()
        .enumerate()
        .map(|(index, &(mutation_rate, trial))| {
            let mut rng = SmallRng::seed_from_u64(derive_seed(config.seed, index as u64 + 1));
            let id = run_id(mutation_rate, trial);
            let mut recorder = LoggingRecorder::new(id.as_str(), HistoryRecorder::new());
            let result = run_with_recorder(
                &target,
                &config.setting(mutation_rate),
                &id,
                &mut rng,
                &mut recorder,
            )?;
            let outcome = TrialOutcome {
                mutation_rate,
                trial,
                result,
            };
            on_trial(&outcome);
            Ok(outcome)
        })
        .collect::<ConfigResult<Vec<_>>>()?;

    let summaries = config
        .mutation_rates
        .iter()
        .map(|&rate| {
            SettingSummary::from_results(
                rate,
                trials
                    .iter()
                    .filter(|t| same_rate(t.mutation_rate, rate))
                    .map(|t| &t.result),
            )
        })
        .collect();

    Ok(ExperimentReport {
        target,
        trials,
        summaries,
    })
}

fn same_rate(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ExperimentConfig {
        ExperimentConfig {
            base: GaConfig {
                population_size: 30,
                max_generations: 200,
                ..GaConfig::default()
            },
            mutation_rates: vec![0.01, 0.05],
            trials_per_setting: 3,
            genome_length: 12,
            seed: 7,
        }
    }

    #[test]
    fn test_run_id_format() {
        assert_eq!(run_id(0.005, 1), "mr_0.005_trial_1");
        assert_eq!(run_id(0.05, 5), "mr_0.05_trial_5");
    }

    #[test]
    fn test_derive_seed_distinct() {
        let seeds: std::collections::HashSet<u64> = (0..100).map(|i| derive_seed(42, i)).collect();
        assert_eq!(seeds.len(), 100);
    }

    #[test]
    fn test_sweep_order_and_summaries() {
        let config = small_config();
        let report = run_sweep(&config).unwrap();

        assert_eq!(report.trials.len(), config.total_runs());
        let order: Vec<(f64, usize)> = report
            .trials
            .iter()
            .map(|t| (t.mutation_rate, t.trial))
            .collect();
        assert_eq!(
            order,
            vec![(0.01, 1), (0.01, 2), (0.01, 3), (0.05, 1), (0.05, 2), (0.05, 3)]
        );
        assert_eq!(report.summaries.len(), 2);
        assert_eq!(report.summaries[0].trials, 3);
        assert_eq!(report.trials[4].result.run_id(), "mr_0.05_trial_2");
    }

    #[test]
    fn test_sweep_is_reproducible() {
        let config = small_config();
        let a = run_sweep(&config).unwrap();
        let b = run_sweep(&config).unwrap();

        assert_eq!(a.target, b.target);
        for (x, y) in a.trials.iter().zip(&b.trials) {
            assert_eq!(x.result.generations_used(), y.result.generations_used());
            assert_eq!(x.result.best_individual(), y.result.best_individual());
        }
    }

    #[test]
    fn test_invalid_rate_rejected_up_front() {
        let config = ExperimentConfig {
            mutation_rates: vec![0.01, 2.0],
            ..small_config()
        };
        assert!(run_sweep(&config).is_err());
    }

    #[test]
    fn test_duplicate_rate_rejected() {
        let config = ExperimentConfig {
            mutation_rates: vec![0.01, 0.05, 0.01],
            ..small_config()
        };
        assert_eq!(config.validate(), Err(ConfigError::DuplicateRate(0.01)));
        assert!(run_sweep(&config).is_err());
    }

    #[test]
    fn test_signed_zero_rates_are_distinct() {
        let config = ExperimentConfig {
            mutation_rates: vec![0.0, -0.0],
            ..small_config()
        };
        // -0.0 lies within [0, 1] and differs from 0.0 bitwise
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_summary_without_successes() {
        let summary = SettingSummary::from_results(0.01, std::iter::empty());
        assert_eq!(summary.found_count, 0);
        assert_eq!(summary.avg_generations, None);
        assert_eq!(summary.avg_time_sec, None);
    }

    #[test]
    fn test_curves_use_first_trial() {
        let report = run_sweep(&small_config()).unwrap();
        let curves = report.curves_for(0.05);

        assert_eq!(curves.len(), 1);
        assert_eq!(curves.curves[0].label, "mutation=0.05");
        assert_eq!(curves.max_fitness, 12);
    }
}
