use crate::composition::Scope;
use crate::utils::config::DEFAULT_REPORT_PATH;
use std::path::PathBuf;

/// Arguments for the aggregate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AggregateArgs {
    /// Run data file (JSON)
    pub runs: PathBuf,

    /// Curve definition file (TOML)
    pub curves: PathBuf,

    /// Output path for the JSON report
    pub output: PathBuf,

    /// Scopes to compute curves at
    pub scopes: Vec<Scope>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Maximum number of curves in the text summary
    pub summary_lines: usize,
}

impl Default for AggregateArgs {
    fn default() -> Self {
        Self {
            runs: PathBuf::from("runs.json"),
            curves: PathBuf::from("curves.toml"),
            output: PathBuf::from(DEFAULT_REPORT_PATH),
            scopes: vec![Scope::Experiment],
            print_summary: false,
            summary_lines: 40,
        }
    }
}
