//! Curve definition files.
//!
//! Curve definitions are TOML tables naming the dimensions, statistics
//! and transforms of each curve:
//!
//! ```toml
//! [[curve]]
//! x = "time"
//! y = "f"
//! primary = "min"
//! secondary = "median"
//! x_transform = "log10"
//! ```

use crate::composition::{CurveAggregation, ExperimentSet};
use crate::functions::UnaryFunction;
use crate::stats::StatisticalParameter;
use crate::utils::error::{ConfigError, ParseError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete curve definition file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CurveFile {
    #[serde(default, rename = "curve")]
    pub curves: Vec<CurveDefinition>,
}

/// One curve as written in the file, before names are resolved
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CurveDefinition {
    /// Name of the x dimension
    pub x: String,

    /// Name of the y dimension
    pub y: String,

    /// Statistic across the runs of one instance
    pub primary: String,

    /// Statistic across run-set curves (defaults to median)
    #[serde(default)]
    pub secondary: Option<String>,

    #[serde(default)]
    pub x_transform: Option<String>,

    #[serde(default)]
    pub y_input_transform: Option<String>,

    #[serde(default)]
    pub y_output_transform: Option<String>,
}

impl CurveDefinition {
    /// Resolve dimension, statistic and transform names against `data`
    ///
    /// # Errors
    /// * `ConfigError::InvalidDimension` - unknown dimension name
    /// * `ConfigError::UnknownParameter` / `UnknownTransform` - bad names
    pub fn resolve(&self, data: &ExperimentSet) -> Result<CurveAggregation, ConfigError> {
        let dimension = |name: &str| {
            data.dimension(name).cloned().ok_or_else(|| {
                ConfigError::InvalidDimension(format!("unknown dimension '{}'", name))
            })
        };
        let transform = |text: &Option<String>| -> Result<UnaryFunction, ConfigError> {
            text.as_deref().map_or(Ok(UnaryFunction::Identity), |t| t.parse())
        };

        let mut builder = CurveAggregation::builder()
            .x_dimension(dimension(&self.x)?)
            .y_dimension(dimension(&self.y)?)
            .primary(self.primary.parse::<StatisticalParameter>()?)
            .x_transform(transform(&self.x_transform)?)
            .y_input_transform(transform(&self.y_input_transform)?)
            .y_output_transform(transform(&self.y_output_transform)?);
        if let Some(secondary) = &self.secondary {
            builder = builder.secondary(secondary.parse()?);
        }
        builder.build()
    }
}

/// Load curve definitions from a TOML file
///
/// # Errors
/// * `ParseError::IoError` - file cannot be read
/// * `ParseError::TomlError` - invalid TOML
pub fn load_curves(path: impl AsRef<Path>) -> Result<CurveFile, ParseError> {
    let contents = fs::read_to_string(path)?;
    parse_curves(&contents)
}

pub fn parse_curves(contents: &str) -> Result<CurveFile, ParseError> {
    let file: CurveFile = toml::from_str(contents)?;
    debug!("Parsed {} curve definitions", file.curves.len());
    Ok(file)
}
