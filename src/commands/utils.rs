use crate::output::read_report;
use crate::parser::load_runs;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a run data file
pub fn validate_runs_file(file_path: PathBuf) -> Result<()> {
    println!("Validating runs: {}", file_path.display());

    let data = load_runs(&file_path)?;
    let runs: usize = data.run_sets().map(|r| r.runs().len()).sum();

    println!("✓ Valid run file");
    println!(
        "  Dimensions: {}",
        data.dimensions()
            .iter()
            .map(|d| d.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Experiments: {}", data.experiments().len());
    println!("  Run Sets: {}", data.run_sets().count());
    println!("  Runs: {}", runs);

    Ok(())
}

/// Validate a curve report JSON file
pub fn validate_report_file(file_path: PathBuf) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Generated: {}", report.generated_at);
    println!("  Curves: {}", report.curves.len());

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Bench Curves Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  generated_at: string     - ISO 8601 timestamp");
        println!("  curves: array            - One entry per curve and element");
        println!("    metadata: object       - Curve description");
        println!("      scope: string        - run_set, experiment or experiment_set");
        println!("      x_label: string      - X axis label, e.g. 'log10(time)'");
        println!("      y_label: string      - Y axis label, e.g. 'med(min(f))'");
        println!("      path_name: string    - File-system friendly curve name");
        println!("    element: string        - Instance or experiment the curve belongs to");
        println!("    points: array          - [x, y] pairs; 'inf' / '-inf' / null allowed");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Bench Curves v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Statistical performance curves for optimization benchmarking runs.");
}
