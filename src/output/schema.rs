//! Curve report schema.
//!
//! This module defines the structure of the JSON report written to disk.
//! Schema is versioned to allow future evolution.

use crate::composition::CurveMetadata;
use crate::matrix::Matrix;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// One entry per curve and element
    pub curves: Vec<CurveEntry>,
}

/// A computed curve together with its description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveEntry {
    /// Labels and file name for renderers
    pub metadata: CurveMetadata,

    /// Run set instance, experiment name or "all experiments"
    pub element: String,

    /// Rows of `[x, y]`; NaN is `null`, infinities are `"inf"` / `"-inf"`
    pub points: Matrix,
}
