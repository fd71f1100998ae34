//! Curve aggregation at run-set, experiment and collection scope.
//!
//! The run-set curve applies the primary statistic across the runs of
//! one instance. Experiment and collection curves pool run-set curves
//! and apply the secondary statistic across them.

use super::model::{Dimension, Element, Experiment, ExperimentSet, RunSet, Scope};
use crate::aggregator::Direction;
use crate::functions::UnaryFunction;
use crate::matrix::{Matrix, MatrixBuilder};
use crate::stats::StatisticalParameter;
use crate::utils::error::{ConfigError, CurveError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Identity of the run-set computation
///
/// The output transform and the secondary parameter do not change
/// which per-run-set curve is computed, so they are not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunSetKey {
    pub x_index: usize,
    pub y_index: usize,
    pub x_transform: UnaryFunction,
    pub y_input_transform: UnaryFunction,
    pub primary: StatisticalParameter,
}

/// Labels and file name describing a curve to renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveMetadata {
    pub scope: Scope,
    pub x_label: String,
    pub y_label: String,
    /// Only `[a-z0-9_]`, safe as a file name component
    pub path_name: String,
}

/// Fully specified statistical curve over two dimensions
#[derive(Debug, Clone)]
pub struct CurveAggregation {
    x: Dimension,
    y: Dimension,
    x_transform: UnaryFunction,
    y_input_transform: UnaryFunction,
    y_output_transform: UnaryFunction,
    primary: StatisticalParameter,
    secondary: StatisticalParameter,
}

impl CurveAggregation {
    pub fn builder() -> CurveAggregationBuilder {
        CurveAggregationBuilder::default()
    }

    pub fn x_dimension(&self) -> &Dimension {
        &self.x
    }

    pub fn y_dimension(&self) -> &Dimension {
        &self.y
    }

    pub fn x_transform(&self) -> UnaryFunction {
        self.x_transform
    }

    pub fn y_input_transform(&self) -> UnaryFunction {
        self.y_input_transform
    }

    pub fn y_output_transform(&self) -> UnaryFunction {
        self.y_output_transform
    }

    pub fn primary(&self) -> StatisticalParameter {
        self.primary
    }

    pub fn secondary(&self) -> StatisticalParameter {
        self.secondary
    }

    pub fn run_set_key(&self) -> RunSetKey {
        RunSetKey {
            x_index: self.x.index(),
            y_index: self.y.index(),
            x_transform: self.x_transform,
            y_input_transform: self.y_input_transform,
            primary: self.primary,
        }
    }

    /// Direction of the transformed x axis
    pub fn x_direction(&self) -> Direction {
        let direction = self.x.direction();
        if self.x_transform.reverses_order() {
            direction.reversed()
        } else {
            direction
        }
    }

    /// Compute the curve for `element`
    ///
    /// # Errors
    /// * `CurveError::UnsupportedElement` - single runs and instances have no curve
    /// * `CurveError::ColumnOutOfRange` - a run lacks the x or y column
    pub fn compute(&self, element: Element<'_>) -> Result<Matrix, CurveError> {
        match element {
            Element::RunSet(run_set) => self.compute_run_set(run_set),
            Element::Experiment(experiment) => self.compute_experiment(experiment),
            Element::ExperimentSet(set) => self.compute_experiment_set(set),
            Element::Run(_) | Element::Instance(_) => {
                Err(CurveError::UnsupportedElement(element.kind()))
            }
        }
    }

    fn compute_run_set(&self, run_set: &RunSet) -> Result<Matrix, CurveError> {
        debug!(
            "Run-set curve for '{}' over {} runs",
            run_set.instance(),
            run_set.runs().len()
        );

        let direction = self.x_direction();
        if self.x_transform.is_identity() && self.y_input_transform.is_identity() {
            return self.primary.aggregate_columns(
                run_set.runs(),
                self.x.index(),
                self.y.index(),
                direction,
                &self.y_output_transform,
            );
        }

        let runs = run_set
            .runs()
            .iter()
            .map(|run| self.transform_run(run))
            .collect::<Result<Vec<_>, _>>()?;
        self.primary
            .aggregate_columns(&runs, 0, 1, direction, &self.y_output_transform)
    }

    fn compute_experiment(&self, experiment: &Experiment) -> Result<Matrix, CurveError> {
        info!("Experiment curve for '{}'", experiment.name());
        let curves = experiment
            .run_sets()
            .iter()
            .map(|run_set| self.compute_run_set(run_set))
            .collect::<Result<Vec<_>, _>>()?;
        self.pool(&curves)
    }

    fn compute_experiment_set(&self, set: &ExperimentSet) -> Result<Matrix, CurveError> {
        info!("Collection curve over {} experiments", set.experiments().len());
        let curves = set
            .run_sets()
            .map(|run_set| self.compute_run_set(run_set))
            .collect::<Result<Vec<_>, _>>()?;
        self.pool(&curves)
    }

    /// Secondary statistic across run-set curves; they are already transformed
    fn pool(&self, curves: &[Matrix]) -> Result<Matrix, CurveError> {
        self.secondary.aggregate_columns(
            curves,
            0,
            1,
            self.x_direction(),
            &UnaryFunction::Identity,
        )
    }

    /// Two-column copy of a run with the input transforms applied
    fn transform_run(&self, run: &Matrix) -> Result<Matrix, CurveError> {
        let needed = self.x.index().max(self.y.index());
        if run.is_empty() {
            return Ok(Matrix::empty(2));
        }
        if needed >= run.column_count() {
            return Err(CurveError::ColumnOutOfRange {
                column: needed,
                columns: run.column_count(),
            });
        }

        let mut builder = MatrixBuilder::with_columns(2)?;
        for row in 0..run.row_count() {
            let x = self.x_transform.apply_value(run.get(row, self.x.index()));
            let y = self.y_input_transform.apply_value(run.get(row, self.y.index()));
            builder.append(x.persisted());
            builder.append(y.persisted());
        }
        Ok(builder.finalize()?)
    }

    pub fn x_axis_label(&self) -> String {
        self.x_transform.render(self.x.name())
    }

    /// Label of the y axis of a curve at `scope`, e.g. `med(min(f))`
    pub fn y_axis_label(&self, scope: Scope) -> String {
        let input = self.y_input_transform.render(self.y.name());
        let run_set = self
            .y_output_transform
            .render(&format!("{}({})", self.primary.short_name(), input));
        match scope {
            Scope::RunSet => run_set,
            Scope::Experiment | Scope::ExperimentSet => {
                format!("{}({})", self.secondary.short_name(), run_set)
            }
        }
    }

    /// File-name-safe description, e.g. `med_min_f_over_log10_time`
    pub fn path_name(&self, scope: Scope) -> String {
        sanitize_path_name(&format!(
            "{}_over_{}",
            self.y_axis_label(scope),
            self.x_axis_label()
        ))
    }

    pub fn describe(&self, scope: Scope) -> CurveMetadata {
        CurveMetadata {
            scope,
            x_label: self.x_axis_label(),
            y_label: self.y_axis_label(scope),
            path_name: self.path_name(scope),
        }
    }
}

/// Equality ignores the output transform
impl PartialEq for CurveAggregation {
    fn eq(&self, other: &Self) -> bool {
        self.run_set_key() == other.run_set_key() && self.secondary == other.secondary
    }
}

impl Eq for CurveAggregation {}

impl Hash for CurveAggregation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.run_set_key().hash(state);
        self.secondary.hash(state);
    }
}

/// Lower-case, `[a-z0-9]` runs joined by single underscores
fn sanitize_path_name(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Builder for [`CurveAggregation`]
///
/// x, y and the primary parameter are required; the secondary parameter
/// defaults to the median and all transforms to the identity.
#[derive(Debug, Clone, Default)]
pub struct CurveAggregationBuilder {
    x: Option<Dimension>,
    y: Option<Dimension>,
    x_transform: UnaryFunction,
    y_input_transform: UnaryFunction,
    y_output_transform: UnaryFunction,
    primary: Option<StatisticalParameter>,
    secondary: Option<StatisticalParameter>,
}

impl CurveAggregationBuilder {
    pub fn x_dimension(mut self, dimension: Dimension) -> Self {
        self.x = Some(dimension);
        self
    }

    pub fn y_dimension(mut self, dimension: Dimension) -> Self {
        self.y = Some(dimension);
        self
    }

    pub fn x_transform(mut self, function: UnaryFunction) -> Self {
        self.x_transform = function;
        self
    }

    pub fn y_input_transform(mut self, function: UnaryFunction) -> Self {
        self.y_input_transform = function;
        self
    }

    pub fn y_output_transform(mut self, function: UnaryFunction) -> Self {
        self.y_output_transform = function;
        self
    }

    pub fn primary(mut self, parameter: StatisticalParameter) -> Self {
        self.primary = Some(parameter);
        self
    }

    pub fn secondary(mut self, parameter: StatisticalParameter) -> Self {
        self.secondary = Some(parameter);
        self
    }

    /// # Errors
    /// * `ConfigError::MissingXDimension` / `MissingYDimension` / `MissingPrimaryParameter`
    /// * `ConfigError::SameDimension` - x and y read the same column
    pub fn build(self) -> Result<CurveAggregation, ConfigError> {
        let x = self.x.ok_or(ConfigError::MissingXDimension)?;
        let y = self.y.ok_or(ConfigError::MissingYDimension)?;
        let primary = self.primary.ok_or(ConfigError::MissingPrimaryParameter)?;
        if x.index() == y.index() {
            return Err(ConfigError::SameDimension(x.index()));
        }

        Ok(CurveAggregation {
            x,
            y,
            x_transform: self.x_transform,
            y_input_transform: self.y_input_transform,
            y_output_transform: self.y_output_transform,
            primary,
            secondary: self.secondary.unwrap_or_default(),
        })
    }
}
