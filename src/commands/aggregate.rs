//! Aggregate command implementation.
//!
//! The aggregate command:
//! 1. Loads run data
//! 2. Loads and resolves curve definitions
//! 3. Computes every curve at every requested scope
//! 4. Writes the JSON report

use crate::commands::models::AggregateArgs;
use crate::composition::{CurveAggregation, Element, ExperimentSet, Scope};
use crate::output::{generate_text_summary, write_report, CurveEntry, CurveReport};
use crate::parser::{load_curves, load_runs};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{debug, info, warn};
use std::time::Instant;

/// Execute the aggregate command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable or malformed run / curve files
/// * Curve definitions naming unknown dimensions or statistics
/// * File write errors
pub fn execute_aggregate(args: AggregateArgs) -> Result<CurveReport> {
    let start_time = Instant::now();

    let data = load_runs(&args.runs)
        .with_context(|| format!("Failed to load runs from {}", args.runs.display()))?;
    let definitions = load_curves(&args.curves)
        .with_context(|| format!("Failed to load curves from {}", args.curves.display()))?;

    if definitions.curves.is_empty() {
        warn!("No curves defined in {}", args.curves.display());
    }

    let aggregations = definitions
        .curves
        .iter()
        .enumerate()
        .map(|(index, definition)| {
            definition
                .resolve(&data)
                .with_context(|| format!("Invalid curve definition #{}", index + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    let report = build_report(&data, &aggregations, &args.scopes)?;

    write_report(&report, &args.output).context("Failed to write curve report")?;

    if args.print_summary {
        println!("{}", generate_text_summary(&report, args.summary_lines));
    }

    info!(
        "Computed {} curves in {:.2?}",
        report.curves.len(),
        start_time.elapsed()
    );

    Ok(report)
}

/// Compute every aggregation at every scope
///
/// **Public** - usable without touching the file system
pub fn build_report(
    data: &ExperimentSet,
    aggregations: &[CurveAggregation],
    scopes: &[Scope],
) -> Result<CurveReport> {
    if scopes.is_empty() {
        bail!("No scope selected");
    }

    let mut curves = Vec::new();
    for aggregation in aggregations {
        for &scope in scopes {
            for element in elements(data, scope) {
                debug!(
                    "Computing {} for {} '{}'",
                    aggregation.path_name(scope),
                    element.kind(),
                    element.name()
                );
                let points = aggregation.compute(element).with_context(|| {
                    format!(
                        "Failed to compute {} for '{}'",
                        aggregation.path_name(scope),
                        element.name()
                    )
                })?;
                curves.push(CurveEntry {
                    metadata: aggregation.describe(scope),
                    element: element.name(),
                    points,
                });
            }
        }
    }

    Ok(CurveReport {
        version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        curves,
    })
}

/// Elements a curve is computed for at `scope`
fn elements(data: &ExperimentSet, scope: Scope) -> Vec<Element<'_>> {
    match scope {
        Scope::RunSet => data.run_sets().map(Element::RunSet).collect(),
        Scope::Experiment => data.experiments().iter().map(Element::Experiment).collect(),
        Scope::ExperimentSet => vec![Element::ExperimentSet(data)],
    }
}
