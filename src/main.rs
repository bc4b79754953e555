//! Passcode GA CLI - evolve bit strings toward a hidden passcode.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Passcode GA - recover a hidden bit pattern by evolutionary search
#[derive(Parser, Debug)]
#[command(name = "passcode-ga")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single search and report the result
    Run {
        /// Passcode length in bits (ignored when --target is given)
        #[arg(short, long, default_value = "32")]
        bits: usize,

        /// Explicit target passcode, e.g. 10110010 (default: random)
        #[arg(short, long)]
        target: Option<String>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        #[command(flatten)]
        ga: cli::GaArgs,

        /// Write the convergence history as CSV
        #[arg(long)]
        history: Option<PathBuf>,

        /// Write the best-fitness curve as JSON
        #[arg(long)]
        curves: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Sweep mutation rates over repeated trials
    Tune {
        /// Directory for summary, history and curve files
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Mutation rates to compare
        #[arg(short, long, value_delimiter = ',', default_values_t = vec![0.005, 0.01, 0.02, 0.05])]
        rates: Vec<f64>,

        /// Trials per mutation rate
        #[arg(short = 'n', long, default_value = "5")]
        trials: usize,

        /// Passcode length in bits
        #[arg(short, long, default_value = "32")]
        bits: usize,

        /// Base random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        #[command(flatten)]
        ga: cli::GaArgs,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Print the default GA configuration as JSON
    ExampleConfig,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match args.command {
        Commands::Run {
            bits,
            target,
            seed,
            ga,
            history,
            curves,
            format,
        } => cli::run::execute(bits, target, seed, &ga, history, curves, format),

        Commands::Tune {
            output,
            rates,
            trials,
            bits,
            seed,
            threads,
            ga,
            progress,
        } => cli::tune::execute(output, rates, trials, bits, seed, threads, &ga, progress),

        Commands::ExampleConfig => cli::print_example_config(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
