//! Aggregation of many run series into one statistical curve.
//!
//! This module provides:
//! - A synchronized cursor over several step-function series
//! - The curve aggregator that stores only the points where the
//!   aggregated value changes

pub mod cursor;
pub mod curve;

// Re-export main types
pub use cursor::{Direction, SeriesCursor};
pub use curve::CurveAggregator;
