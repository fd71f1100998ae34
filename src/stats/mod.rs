//! Statistical parameters applied across runs.
//!
//! A [`StatisticalParameter`] names an aggregate such as the median. It
//! hands out fresh [`Accumulator`]s for point-wise use and can aggregate
//! a whole list of matrices column-wise into one curve.

pub mod accumulator;

pub use accumulator::Accumulator;

use crate::aggregator::{CurveAggregator, Direction, SeriesCursor};
use crate::functions::UnaryFunction;
use crate::matrix::Matrix;
use crate::utils::error::{ConfigError, CurveError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A quantile position in whole percent, `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Percent(u8);

impl Percent {
    pub fn new(percent: u32) -> Result<Self, ConfigError> {
        if percent > 100 {
            return Err(ConfigError::QuantileOutOfRange(percent));
        }
        Ok(Percent(percent as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Percent {
    type Error = ConfigError;

    fn try_from(percent: u32) -> Result<Self, Self::Error> {
        Percent::new(percent)
    }
}

impl From<Percent> for u32 {
    fn from(percent: Percent) -> Self {
        percent.0 as u32
    }
}

/// Named aggregate over the values of several runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatisticalParameter {
    Minimum,
    Maximum,
    #[default]
    Median,
    Mean,
    StandardDeviation,
    Quantile(Percent),
}

impl StatisticalParameter {
    /// Quantile at `percent` percent
    pub fn quantile(percent: u32) -> Result<Self, ConfigError> {
        Ok(StatisticalParameter::Quantile(Percent::new(percent)?))
    }

    /// A new, empty accumulator for this parameter
    pub fn fresh_accumulator(&self) -> Accumulator {
        Accumulator::new(*self)
    }

    /// Short name used in files and labels, e.g. `med` or `q15`
    pub fn short_name(&self) -> String {
        match self {
            StatisticalParameter::Minimum => "min".to_string(),
            StatisticalParameter::Maximum => "max".to_string(),
            StatisticalParameter::Median => "med".to_string(),
            StatisticalParameter::Mean => "mean".to_string(),
            StatisticalParameter::StandardDeviation => "sd".to_string(),
            StatisticalParameter::Quantile(percent) => format!("q{}", percent.value()),
        }
    }

    /// Human readable name
    pub fn long_name(&self) -> String {
        match self {
            StatisticalParameter::Minimum => "minimum".to_string(),
            StatisticalParameter::Maximum => "maximum".to_string(),
            StatisticalParameter::Median => "median".to_string(),
            StatisticalParameter::Mean => "arithmetic mean".to_string(),
            StatisticalParameter::StandardDeviation => "standard deviation".to_string(),
            StatisticalParameter::Quantile(percent) => format!("{}% quantile", percent.value()),
        }
    }

    /// Aggregate the step functions in `sources` into one curve.
    ///
    /// Every source contributes its `x_column` / `y_column` pair. The
    /// result has two columns (x, y) and only contains the points where
    /// the statistic changes, plus the last point. `output` is applied to
    /// each aggregated y value.
    ///
    /// # Errors
    /// * `CurveError::ColumnOutOfRange` - a non-empty source lacks a column
    pub fn aggregate_columns<M: AsRef<Matrix>>(
        &self,
        sources: &[M],
        x_column: usize,
        y_column: usize,
        direction: Direction,
        output: &UnaryFunction,
    ) -> Result<Matrix, CurveError> {
        debug!(
            "Aggregating {} series with {} (x={}, y={}, {:?})",
            sources.len(),
            self.short_name(),
            x_column,
            y_column,
            direction
        );

        let cursor = SeriesCursor::new(sources, x_column, y_column, direction)?;
        CurveAggregator::new(cursor, self.fresh_accumulator(), *output).aggregate()
    }
}

impl fmt::Display for StatisticalParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for StatisticalParameter {
    type Err = ConfigError;

    /// Accepts short and long names plus `q<percent>` / `p<percent>`
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim().to_ascii_lowercase();
        match text.as_str() {
            "min" | "minimum" => return Ok(StatisticalParameter::Minimum),
            "max" | "maximum" => return Ok(StatisticalParameter::Maximum),
            "med" | "median" => return Ok(StatisticalParameter::Median),
            "mean" | "avg" | "average" => return Ok(StatisticalParameter::Mean),
            "sd" | "stddev" | "std" => return Ok(StatisticalParameter::StandardDeviation),
            _ => {}
        }

        let digits = text
            .strip_prefix('q')
            .or_else(|| text.strip_prefix('p'))
            .ok_or_else(|| ConfigError::UnknownParameter(text.clone()))?;
        let percent: u32 = digits
            .parse()
            .map_err(|_| ConfigError::UnknownParameter(text.clone()))?;
        StatisticalParameter::quantile(percent)
    }
}
