//! Minimal experiment data model consumed by the composition layer.
//!
//! Runs are matrices whose columns are the measured dimensions. Runs of
//! one algorithm on one benchmark instance form a [`RunSet`], run sets
//! form an [`Experiment`], experiments form an [`ExperimentSet`].

use crate::aggregator::Direction;
use crate::matrix::Matrix;
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A measured quantity and the column it occupies in every run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    index: usize,
    name: String,
    direction: Direction,
}

impl Dimension {
    /// # Errors
    /// * `ConfigError::InvalidDimension` - blank name
    pub fn new(
        index: usize,
        name: impl Into<String>,
        direction: Direction,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidDimension(format!(
                "dimension {} has no name",
                index
            )));
        }
        Ok(Self {
            index,
            name,
            direction,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// Repeated runs of one algorithm on one benchmark instance
#[derive(Debug, Clone, PartialEq)]
pub struct RunSet {
    instance: String,
    runs: Vec<Matrix>,
}

impl RunSet {
    pub fn new(instance: impl Into<String>, runs: Vec<Matrix>) -> Self {
        Self {
            instance: instance.into(),
            runs,
        }
    }

    pub fn instance(&self) -> &str {
        &self.instance
    }

    pub fn runs(&self) -> &[Matrix] {
        &self.runs
    }
}

/// All run sets of one algorithm setup
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    name: String,
    run_sets: Vec<RunSet>,
}

impl Experiment {
    pub fn new(name: impl Into<String>, run_sets: Vec<RunSet>) -> Self {
        Self {
            name: name.into(),
            run_sets,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run_sets(&self) -> &[RunSet] {
        &self.run_sets
    }
}

/// A whole collection of experiments over shared dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentSet {
    dimensions: Vec<Dimension>,
    experiments: Vec<Experiment>,
}

impl ExperimentSet {
    pub fn new(dimensions: Vec<Dimension>, experiments: Vec<Experiment>) -> Self {
        Self {
            dimensions,
            experiments,
        }
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Look up a dimension by name
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    pub fn experiments(&self) -> &[Experiment] {
        &self.experiments
    }

    /// Every run set of every experiment
    pub fn run_sets(&self) -> impl Iterator<Item = &RunSet> {
        self.experiments.iter().flat_map(|e| e.run_sets.iter())
    }
}

/// Scope a curve is computed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    RunSet,
    Experiment,
    ExperimentSet,
}

impl Scope {
    pub fn name(self) -> &'static str {
        match self {
            Scope::RunSet => "run_set",
            Scope::Experiment => "experiment",
            Scope::ExperimentSet => "experiment_set",
        }
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "run_set" | "runset" => Ok(Scope::RunSet),
            "experiment" => Ok(Scope::Experiment),
            "experiment_set" | "experimentset" | "all" => Ok(Scope::ExperimentSet),
            other => Err(format!(
                "unknown scope '{}' (expected run_set, experiment or experiment_set)",
                other
            )),
        }
    }
}

/// Any node of the data model a curve may be requested for
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    /// A single run
    Run(&'a Matrix),
    /// A benchmark instance, identified by name
    Instance(&'a str),
    RunSet(&'a RunSet),
    Experiment(&'a Experiment),
    ExperimentSet(&'a ExperimentSet),
}

impl<'a> Element<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Run(_) => "run",
            Element::Instance(_) => "instance",
            Element::RunSet(_) => "run_set",
            Element::Experiment(_) => "experiment",
            Element::ExperimentSet(_) => "experiment_set",
        }
    }

    /// Scope of the curve for this element, if curves exist for it
    pub fn scope(&self) -> Option<Scope> {
        match self {
            Element::RunSet(_) => Some(Scope::RunSet),
            Element::Experiment(_) => Some(Scope::Experiment),
            Element::ExperimentSet(_) => Some(Scope::ExperimentSet),
            Element::Run(_) | Element::Instance(_) => None,
        }
    }

    /// Display name of the element
    pub fn name(&self) -> String {
        match self {
            Element::Run(run) => format!("run of {} rows", run.row_count()),
            Element::Instance(name) => name.to_string(),
            Element::RunSet(run_set) => run_set.instance().to_string(),
            Element::Experiment(experiment) => experiment.name().to_string(),
            Element::ExperimentSet(_) => "all experiments".to_string(),
        }
    }
}
