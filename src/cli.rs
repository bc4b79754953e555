//! CLI command implementations for Passcode GA.

pub(crate) mod run;
pub(crate) mod tune;

mod output;

use clap::{Args, ValueEnum};
use passcode_ga::GaConfig;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// GA parameter overrides shared by `run` and `tune`.
#[derive(Args, Debug, Default)]
pub(crate) struct GaArgs {
    /// JSON file with GA parameters (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Population size
    #[arg(long)]
    population: Option<usize>,

    /// Crossover probability per parent pair
    #[arg(long)]
    crossover_rate: Option<f64>,

    /// Per-bit mutation probability (`tune` sweeps this instead)
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Tournament size
    #[arg(long)]
    tournament: Option<usize>,

    /// Generation budget
    #[arg(long)]
    max_generations: Option<usize>,
}

impl GaArgs {
    /// Build a configuration: defaults, then the JSON file, then flags.
    pub(crate) fn resolve(&self) -> Result<GaConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    CliError::new(format!("Failed to read {}: {e}", path.display()))
                })?;
                serde_json::from_str(&text).map_err(|e| {
                    CliError::new(format!("Failed to parse {}: {e}", path.display()))
                })?
            }
            None => GaConfig::default(),
        };

        if let Some(v) = self.population {
            config.population_size = v;
        }
        if let Some(v) = self.crossover_rate {
            config.crossover_rate = v;
        }
        if let Some(v) = self.mutation_rate {
            config.mutation_rate = v;
        }
        if let Some(v) = self.tournament {
            config.tournament_size = v;
        }
        if let Some(v) = self.max_generations {
            config.max_generations = v;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Seed from the clock when none is given.
pub(crate) fn seed_or_clock(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() ^ u64::from(d.subsec_nanos()))
            .unwrap_or(42)
    })
}

/// Print the default configuration as JSON.
pub(crate) fn print_example_config() -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(&GaConfig::default())?;
    println!("{json}");
    Ok(())
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

impl From<passcode_ga::ConfigError> for CliError {
    fn from(e: passcode_ga::ConfigError) -> Self {
        Self::new(format!("Invalid configuration: {e}"))
    }
}

impl From<passcode_ga::ReportError> for CliError {
    fn from(e: passcode_ga::ReportError) -> Self {
        Self::new(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_defaults() {
        let config = GaArgs::default().resolve().unwrap();
        assert_eq!(config, GaConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"population_size": 60, "tournament_size": 5}}"#).unwrap();

        let args = GaArgs {
            config: Some(file.path().to_path_buf()),
            population: Some(80),
            ..GaArgs::default()
        };
        let config = args.resolve().unwrap();

        assert_eq!(config.population_size, 80);
        assert_eq!(config.tournament_size, 5);
        assert_eq!(config.max_generations, 5000);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = GaArgs {
            crossover_rate: Some(-0.1),
            ..GaArgs::default()
        };
        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("crossover_rate"));
    }
}
