//! Bench Curves CLI
//!
//! Computes statistical performance curves from optimization benchmarking runs.
//! Writes the curves of every requested scope to a JSON report.

use anyhow::Result;
use bench_curves::commands::{
    display_schema, display_version, execute_aggregate, validate_report_file, validate_runs_file,
    AggregateArgs,
};
use bench_curves::composition::Scope;
use bench_curves::utils::config::DEFAULT_REPORT_PATH;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// Bench Curves - Statistical performance curves for benchmarking runs
#[derive(Parser, Debug)]
#[command(name = "bench-curves")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute curves from run data
    Aggregate {
        /// Run data file (JSON)
        #[arg(short, long)]
        runs: PathBuf,

        /// Curve definition file (TOML)
        #[arg(short, long)]
        curves: PathBuf,

        /// Output path for JSON report
        #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
        output: PathBuf,

        /// Scopes to compute curves at (run_set, experiment, experiment_set)
        #[arg(short, long, value_delimiter = ',', default_value = "experiment")]
        scope: Vec<Scope>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Maximum number of curves in the summary
        #[arg(long, default_value = "40")]
        summary_lines: usize,
    },

    /// Validate a run data file or a curve report
    Validate {
        /// Path to run data JSON file
        #[arg(short, long, conflicts_with = "report", required_unless_present = "report")]
        runs: Option<PathBuf>,

        /// Path to curve report JSON file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Aggregate {
            runs,
            curves,
            output,
            scope,
            summary,
            summary_lines,
        } => {
            let args = AggregateArgs {
                runs,
                curves,
                output,
                scopes: scope,
                print_summary: summary,
                summary_lines,
            };

            execute_aggregate(args)?;
        }

        Commands::Validate { runs, report } => {
            if let Some(file) = runs {
                validate_runs_file(file)?;
            }
            if let Some(file) = report {
                validate_report_file(file)?;
            }
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
