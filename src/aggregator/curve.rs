//! Point reduction: turn a synchronized cursor into a compact curve.
//!
//! A curve is a right-continuous step function. Only the points where
//! the aggregated value changes are stored, plus the last visited x so
//! the curve spans the full input range.

use super::cursor::SeriesCursor;
use crate::functions::UnaryFunction;
use crate::matrix::{Matrix, MatrixBuilder, NumericValue};
use crate::stats::Accumulator;
use crate::utils::error::CurveError;
use log::debug;

/// Consumes a [`SeriesCursor`] and emits the aggregated step function
///
/// **Public** - used by `StatisticalParameter::aggregate_columns`
pub struct CurveAggregator<'a, M> {
    cursor: SeriesCursor<'a, M>,
    accumulator: Accumulator,
    output: UnaryFunction,
}

impl<'a, M: AsRef<Matrix>> CurveAggregator<'a, M> {
    /// # Arguments
    /// * `cursor` - positioned before the first step
    /// * `accumulator` - re-seeded at every step
    /// * `output` - applied to every aggregated y value
    pub fn new(cursor: SeriesCursor<'a, M>, accumulator: Accumulator, output: UnaryFunction) -> Self {
        Self {
            cursor,
            accumulator,
            output,
        }
    }

    /// Run the cursor to the end and build the `n x 2` curve matrix
    ///
    /// Overflow is written as infinity and no value as NaN. No input
    /// rows give an empty matrix.
    pub fn aggregate(mut self) -> Result<Matrix, CurveError> {
        let mut builder = MatrixBuilder::with_columns(2)?;
        let mut last_emitted: Option<NumericValue> = None;
        let mut skipped_tail: Option<(NumericValue, NumericValue)> = None;
        let mut steps = 0usize;

        while let Some(x) = self.cursor.next_step() {
            steps += 1;
            self.cursor.feed(&mut self.accumulator);
            let y = self.output.apply_value(self.accumulator.result());

            if last_emitted.is_some_and(|previous| previous.same_as(&y)) {
                skipped_tail = Some((x, y));
                continue;
            }

            emit(&mut builder, x, y);
            last_emitted = Some(y);
            skipped_tail = None;
        }

        // Keep the curve as wide as its input even if y never changed
        if let Some((x, y)) = skipped_tail {
            emit(&mut builder, x, y);
        }

        debug!(
            "Reduced {} steps over {} series to {} points",
            steps,
            self.cursor.source_count(),
            builder.len() / 2
        );

        Ok(builder.finalize()?)
    }
}

fn emit(builder: &mut MatrixBuilder, x: NumericValue, y: NumericValue) {
    builder.append(x.persisted());
    builder.append(y.persisted());
}
