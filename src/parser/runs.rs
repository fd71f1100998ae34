//! Run data loader.
//!
//! Parses a JSON run file into the experiment data model. Cells may be
//! JSON integers, floats, numeric strings or `null` (no value); every
//! run becomes a matrix in the smallest exact storage.

use crate::aggregator::Direction;
use crate::composition::{Dimension, Experiment, ExperimentSet, RunSet};
use crate::matrix::{Matrix, MatrixBuilder};
use crate::utils::config::{DECREASING_NAMES, INCREASING_NAMES};
use crate::utils::error::ParseError;
use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Raw run file as written by the benchmark harness
#[derive(Debug, Clone, Deserialize)]
struct RawRunFile {
    dimensions: Vec<RawDimension>,

    #[serde(default)]
    experiments: Vec<RawExperiment>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDimension {
    name: String,

    /// Defaults to increasing
    #[serde(default)]
    direction: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawExperiment {
    name: String,

    #[serde(default, alias = "runSets")]
    run_sets: Vec<RawRunSet>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawRunSet {
    instance: String,

    /// runs -> rows -> cells
    #[serde(default)]
    runs: Vec<Vec<Vec<Value>>>,
}

/// Load a run file from disk
///
/// **Public** - main entry point for the CLI
///
/// # Errors
/// * `ParseError::IoError` - file cannot be read
/// * `ParseError::JsonError` - not valid JSON of the expected shape
/// * `ParseError::InvalidFormat` / `InvalidNumber` - bad rows or cells
pub fn load_runs(path: impl AsRef<Path>) -> Result<ExperimentSet, ParseError> {
    let path = path.as_ref();
    info!("Loading runs from: {}", path.display());
    let contents = fs::read_to_string(path)?;
    parse_runs(&contents)
}

/// Parse run file contents
pub fn parse_runs(json: &str) -> Result<ExperimentSet, ParseError> {
    let raw: RawRunFile = serde_json::from_str(json)?;

    if raw.dimensions.len() < 2 {
        return Err(ParseError::InvalidFormat(format!(
            "need at least two dimensions, found {}",
            raw.dimensions.len()
        )));
    }

    let dimensions = raw
        .dimensions
        .iter()
        .enumerate()
        .map(|(index, dimension)| to_dimension(index, dimension))
        .collect::<Result<Vec<_>, _>>()?;
    let columns = dimensions.len();

    let mut experiments = Vec::with_capacity(raw.experiments.len());
    for experiment in raw.experiments {
        let mut run_sets = Vec::with_capacity(experiment.run_sets.len());
        for run_set in experiment.run_sets {
            let runs = run_set
                .runs
                .iter()
                .map(|rows| build_run(rows, columns))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| {
                    ParseError::InvalidFormat(format!(
                        "{} / {}: {}",
                        experiment.name, run_set.instance, e
                    ))
                })?;
            run_sets.push(RunSet::new(run_set.instance, runs));
        }
        experiments.push(Experiment::new(experiment.name, run_sets));
    }

    let set = ExperimentSet::new(dimensions, experiments);
    debug!(
        "Loaded {} experiments with {} run sets",
        set.experiments().len(),
        set.run_sets().count()
    );
    Ok(set)
}

fn to_dimension(index: usize, raw: &RawDimension) -> Result<Dimension, ParseError> {
    let direction = match raw.direction.as_deref().map(str::to_ascii_lowercase) {
        None => Direction::Increasing,
        Some(name) if INCREASING_NAMES.contains(&name.as_str()) => Direction::Increasing,
        Some(name) if DECREASING_NAMES.contains(&name.as_str()) => Direction::Decreasing,
        Some(name) => {
            return Err(ParseError::InvalidFormat(format!(
                "unknown direction '{}' for dimension '{}'",
                name, raw.name
            )))
        }
    };
    Ok(Dimension::new(index, raw.name.clone(), direction)?)
}

/// Build one run matrix with `columns` cells per row
fn build_run(rows: &[Vec<Value>], columns: usize) -> Result<Matrix, ParseError> {
    let mut builder = MatrixBuilder::with_columns(columns)?;
    for (index, row) in rows.iter().enumerate() {
        if row.len() != columns {
            return Err(ParseError::InvalidFormat(format!(
                "row {} has {} cells, expected {}",
                index,
                row.len(),
                columns
            )));
        }
        for cell in row {
            append_cell(&mut builder, cell)?;
        }
    }
    Ok(builder.finalize()?)
}

fn append_cell(builder: &mut MatrixBuilder, cell: &Value) -> Result<(), ParseError> {
    match cell {
        Value::Number(number) => {
            if let Some(value) = number.as_i64() {
                builder.append(value);
            } else if let Some(value) = number.as_u64() {
                builder.append(value);
            } else if let Some(value) = number.as_f64() {
                builder.append(value);
            } else {
                return Err(ParseError::InvalidFormat(format!("unreadable number {}", number)));
            }
        }
        Value::String(text) => builder.append_str(text)?,
        Value::Null => builder.append(f64::NAN),
        other => {
            return Err(ParseError::InvalidFormat(format!(
                "unexpected cell {}",
                other
            )))
        }
    }
    Ok(())
}
