//! Input file parsing.
//!
//! This module handles:
//! - Loading run data (JSON) into the experiment data model
//! - Loading curve definitions (TOML)

pub mod curves;
pub mod runs;

// Re-export main types
pub use curves::{load_curves, parse_curves, CurveDefinition, CurveFile};
pub use runs::{load_runs, parse_runs};
