//! Synchronized iteration over several step-function series.
//!
//! Each source matrix holds one series, sorted along the axis
//! direction. The cursor visits every distinct x value of all sources in
//! order and exposes, per source, the y value that is in effect there.

use crate::matrix::{Matrix, NumericValue};
use crate::stats::Accumulator;
use crate::utils::error::CurveError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Order in which an axis is traversed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Increasing,
    Decreasing,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Increasing => Direction::Decreasing,
            Direction::Decreasing => Direction::Increasing,
        }
    }

    /// Does `a` come strictly before `b` along this direction?
    pub fn precedes(self, a: &NumericValue, b: &NumericValue) -> bool {
        let wanted = match self {
            Direction::Increasing => Ordering::Less,
            Direction::Decreasing => Ordering::Greater,
        };
        a.numeric_cmp(b) == Some(wanted)
    }
}

/// Cursor over `K` series sharing an x column and a y column
///
/// Rows whose x has no value are skipped. Before its first x a source
/// contributes no value; after its last row it keeps its last y.
#[derive(Debug)]
pub struct SeriesCursor<'a, M> {
    sources: &'a [M],
    x_column: usize,
    y_column: usize,
    direction: Direction,
    /// Next unread row of every source
    next_rows: Vec<usize>,
    /// y value in effect at the current step, per source
    current: Vec<NumericValue>,
}

impl<'a, M: AsRef<Matrix>> SeriesCursor<'a, M> {
    /// # Errors
    /// * `CurveError::ColumnOutOfRange` - a non-empty source lacks a column
    pub fn new(
        sources: &'a [M],
        x_column: usize,
        y_column: usize,
        direction: Direction,
    ) -> Result<Self, CurveError> {
        let needed = x_column.max(y_column);
        for source in sources {
            let matrix = source.as_ref();
            if !matrix.is_empty() && needed >= matrix.column_count() {
                return Err(CurveError::ColumnOutOfRange {
                    column: needed,
                    columns: matrix.column_count(),
                });
            }
        }

        Ok(Self {
            sources,
            x_column,
            y_column,
            direction,
            next_rows: vec![0; sources.len()],
            current: vec![NumericValue::NoValue; sources.len()],
        })
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move to the next distinct x value; `None` once every source is used up
    pub fn next_step(&mut self) -> Option<NumericValue> {
        let mut step: Option<NumericValue> = None;

        for (index, source) in self.sources.iter().enumerate() {
            let matrix = source.as_ref();
            let row = &mut self.next_rows[index];
            while *row < matrix.row_count() && matrix.get(*row, self.x_column).is_no_value() {
                *row += 1;
            }
            if *row >= matrix.row_count() {
                continue;
            }

            let x = matrix.get(*row, self.x_column);
            let earlier = match &step {
                Some(best) => self.direction.precedes(&x, best),
                None => true,
            };
            if earlier {
                step = Some(x);
            }
        }

        let x = step?;
        for (index, source) in self.sources.iter().enumerate() {
            let matrix = source.as_ref();
            let row = &mut self.next_rows[index];
            // Consume every row at this x, the last one wins
            while *row < matrix.row_count() {
                let candidate = matrix.get(*row, self.x_column);
                if !candidate.is_no_value() && !candidate.numeric_eq(&x) {
                    break;
                }
                if !candidate.is_no_value() {
                    self.current[index] = matrix.get(*row, self.y_column);
                }
                *row += 1;
            }
        }

        Some(x)
    }

    /// y values in effect at the current step, one per source
    pub fn values(&self) -> &[NumericValue] {
        &self.current
    }

    /// Reset `accumulator` and feed it the values of the current step
    pub fn feed(&self, accumulator: &mut Accumulator) {
        accumulator.reset();
        for value in &self.current {
            accumulator.append(*value);
        }
    }
}
