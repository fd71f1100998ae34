//! Hierarchical curve composition.
//!
//! A [`CurveAggregation`] describes one statistical curve (for example
//! "median over instances of the minimum objective value over log time")
//! and computes it for a run set, an experiment or a whole collection.
//!
//! # Example
//! ```ignore
//! let aggregation = CurveAggregation::builder()
//!     .x_dimension(time)
//!     .y_dimension(quality)
//!     .primary(StatisticalParameter::Minimum)
//!     .build()?;
//! let curve = aggregation.compute(Element::Experiment(&experiment))?;
//! ```

mod aggregation;
mod model;

// Public API exports
pub use aggregation::{CurveAggregation, CurveAggregationBuilder, CurveMetadata, RunSetKey};
pub use model::{Dimension, Element, Experiment, ExperimentSet, RunSet, Scope};
