//! Running accumulators for statistical parameters.
//!
//! An accumulator collects the values seen at one point of the shared
//! x axis and reports the statistic over them as a [`NumericValue`].
//!
//! # Algorithms
//!
//! - **Median / quantiles**: order statistics, R-7 interpolation between
//!   neighbours (Hyndman & Fan 1996), exact element when the rank is whole.
//! - **Mean**: exact 128-bit sums for integers, Kahan compensated
//!   summation otherwise.
//! - **Standard deviation**: Welford's online algorithm, sample form.

use super::{Percent, StatisticalParameter};
use crate::matrix::NumericValue;
use std::cmp::Ordering;

/// Collects values and computes one statistical parameter over them
#[derive(Debug, Clone)]
pub struct Accumulator {
    parameter: StatisticalParameter,
    values: Vec<NumericValue>,
}

impl Accumulator {
    pub fn new(parameter: StatisticalParameter) -> Self {
        Self {
            parameter,
            values: Vec::new(),
        }
    }

    pub fn parameter(&self) -> StatisticalParameter {
        self.parameter
    }

    /// Forget all values, keeping the allocation
    pub fn reset(&mut self) {
        self.values.clear();
    }

    /// Add a value; values without a value are ignored and overflow
    /// counts as the matching infinity
    pub fn append(&mut self, value: NumericValue) {
        if !value.is_no_value() {
            self.values.push(value.persisted());
        }
    }

    /// Number of values taken into account
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// The statistic over all appended values
    pub fn result(&mut self) -> NumericValue {
        if self.values.is_empty() {
            return NumericValue::NoValue;
        }

        match self.parameter {
            StatisticalParameter::Minimum => extreme(&self.values, Ordering::Less),
            StatisticalParameter::Maximum => extreme(&self.values, Ordering::Greater),
            StatisticalParameter::Median => {
                sort(&mut self.values);
                median(&self.values)
            }
            StatisticalParameter::Quantile(percent) => {
                sort(&mut self.values);
                quantile(&self.values, percent)
            }
            StatisticalParameter::Mean => mean(&self.values),
            StatisticalParameter::StandardDeviation => standard_deviation(&self.values),
        }
    }
}

fn sort(values: &mut [NumericValue]) {
    values.sort_by(|a, b| a.numeric_cmp(b).unwrap_or(Ordering::Equal));
}

fn extreme(values: &[NumericValue], wanted: Ordering) -> NumericValue {
    let mut best = values[0];
    for value in &values[1..] {
        if value.numeric_cmp(&best) == Some(wanted) {
            best = *value;
        }
    }
    best
}

fn median(sorted: &[NumericValue]) -> NumericValue {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        midpoint(sorted[n / 2 - 1], sorted[n / 2])
    }
}

/// Mean of two neighbouring order statistics
fn midpoint(low: NumericValue, high: NumericValue) -> NumericValue {
    if let Some(infinite) = combine_infinities(&[low, high]) {
        return infinite;
    }
    match (low, high) {
        (NumericValue::Integer(a), NumericValue::Integer(b)) => {
            let sum = a as i128 + b as i128;
            if sum % 2 == 0 {
                NumericValue::Integer((sum / 2) as i64)
            } else {
                NumericValue::Double(sum as f64 / 2.0)
            }
        }
        _ => NumericValue::from_f64(low.as_double() / 2.0 + high.as_double() / 2.0),
    }
}

/// R-7 quantile over sorted values
///
/// The rank `(n - 1) * percent / 100` is split in integer arithmetic so
/// whole ranks select an element exactly.
fn quantile(sorted: &[NumericValue], percent: Percent) -> NumericValue {
    let n = sorted.len();
    let scaled = (n - 1) * percent.value() as usize;
    let lower = scaled / 100;
    let fraction = (scaled % 100) as f64 / 100.0;

    if fraction == 0.0 || lower + 1 >= n {
        return sorted[lower.min(n - 1)];
    }

    let (low, high) = (sorted[lower], sorted[lower + 1]);
    if let Some(infinite) = combine_infinities(&[low, high]) {
        return infinite;
    }

    let a = low.as_double();
    let b = high.as_double();
    NumericValue::settle(
        a + fraction * (b - a),
        low.is_integer() && high.is_integer(),
    )
}

fn mean(values: &[NumericValue]) -> NumericValue {
    if let Some(infinite) = combine_infinities(values) {
        return infinite;
    }

    let n = values.len();
    if values.iter().all(NumericValue::is_integer) {
        let sum: i128 = values.iter().map(|v| v.as_long() as i128).sum();
        return if sum % n as i128 == 0 {
            NumericValue::Integer((sum / n as i128) as i64)
        } else {
            NumericValue::Double(sum as f64 / n as f64)
        };
    }

    let sum = kahan_sum(values.iter().map(NumericValue::as_double));
    NumericValue::from_finite_computation(sum / n as f64)
}

fn standard_deviation(values: &[NumericValue]) -> NumericValue {
    if values.iter().any(NumericValue::is_infinite) {
        return NumericValue::NoValue;
    }

    let integral = values.iter().all(NumericValue::is_integer);
    if values.len() == 1 {
        return NumericValue::Integer(0);
    }

    let mut count = 0.0;
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for value in values {
        let x = value.as_double();
        count += 1.0;
        let delta = x - mean;
        mean += delta / count;
        m2 += delta * (x - mean);
    }

    let deviation = (m2 / (count - 1.0)).sqrt();
    if deviation.is_nan() {
        // inf - inf inside Welford: the finite inputs overflowed
        return NumericValue::PositiveOverflow;
    }
    match NumericValue::from_finite_computation(deviation) {
        NumericValue::Double(d) if d == 0.0 && integral => NumericValue::Integer(0),
        other => other,
    }
}

/// Infinite result of an order statistic or mean, if infinities decide it.
///
/// Infinities of both signs cancel into no value.
fn combine_infinities(values: &[NumericValue]) -> Option<NumericValue> {
    let positive = values.iter().any(|v| v.infinity_sign() > 0);
    let negative = values.iter().any(|v| v.infinity_sign() < 0);
    match (positive, negative) {
        (true, true) => Some(NumericValue::NoValue),
        (true, false) => Some(NumericValue::PositiveInfinity),
        (false, true) => Some(NumericValue::NegativeInfinity),
        (false, false) => None,
    }
}

fn kahan_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for x in values {
        let y = x - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::NumericState;

    fn run(parameter: StatisticalParameter, values: &[NumericValue]) -> NumericValue {
        let mut accumulator = parameter.fresh_accumulator();
        for &value in values {
            accumulator.append(value);
        }
        accumulator.result()
    }

    fn ints(values: &[i64]) -> Vec<NumericValue> {
        values.iter().map(|&v| NumericValue::Integer(v)).collect()
    }

    #[test]
    fn test_empty_has_no_value() {
        assert!(run(StatisticalParameter::Median, &[]).is_no_value());
        assert!(run(StatisticalParameter::Mean, &[NumericValue::NoValue]).is_no_value());
    }

    #[test]
    fn test_median_of_integers() {
        assert_eq!(
            run(StatisticalParameter::Median, &ints(&[7, 1, 5])),
            NumericValue::Integer(5)
        );
        assert_eq!(
            run(StatisticalParameter::Median, &ints(&[5, 7])),
            NumericValue::Integer(6)
        );
        assert_eq!(
            run(StatisticalParameter::Median, &ints(&[5, 6])),
            NumericValue::Double(5.5)
        );
    }

    #[test]
    fn test_median_ignores_missing_values() {
        let mut values = ints(&[3, 9]);
        values.push(NumericValue::NoValue);
        assert_eq!(
            run(StatisticalParameter::Median, &values),
            NumericValue::Integer(6)
        );
    }

    #[test]
    fn test_median_with_infinities() {
        let values = vec![
            NumericValue::Integer(1),
            NumericValue::PositiveOverflow,
            NumericValue::PositiveInfinity,
        ];
        assert_eq!(
            run(StatisticalParameter::Median, &values),
            NumericValue::PositiveInfinity
        );

        let values = vec![NumericValue::NegativeInfinity, NumericValue::PositiveInfinity];
        assert!(run(StatisticalParameter::Median, &values).is_no_value());
    }

    #[test]
    fn test_min_max_keep_integers() {
        let values = vec![
            NumericValue::Double(2.5),
            NumericValue::Integer(-3),
            NumericValue::Integer(9),
        ];
        assert_eq!(
            run(StatisticalParameter::Minimum, &values),
            NumericValue::Integer(-3)
        );
        assert_eq!(
            run(StatisticalParameter::Maximum, &values),
            NumericValue::Integer(9)
        );
    }

    #[test]
    fn test_quantile_interpolates() {
        let q25 = StatisticalParameter::Quantile(Percent::new(25).unwrap());
        // rank 0.75 between 10 and 20
        assert_eq!(
            run(q25, &ints(&[10, 20, 30, 40])),
            NumericValue::Double(17.5)
        );
        // rank 1 exactly
        assert_eq!(run(q25, &ints(&[10, 20, 30, 40, 50])), NumericValue::Integer(20));
    }

    #[test]
    fn test_mean() {
        assert_eq!(
            run(StatisticalParameter::Mean, &ints(&[1, 2, 3])),
            NumericValue::Integer(2)
        );
        assert_eq!(
            run(StatisticalParameter::Mean, &ints(&[1, 2])),
            NumericValue::Double(1.5)
        );
        assert_eq!(
            run(StatisticalParameter::Mean, &ints(&[i64::MAX, i64::MAX])),
            NumericValue::Integer(i64::MAX)
        );
    }

    #[test]
    fn test_mean_overflow() {
        let values = vec![NumericValue::Double(f64::MAX), NumericValue::Double(f64::MAX)];
        assert_eq!(
            run(StatisticalParameter::Mean, &values).state(),
            NumericState::PositiveOverflow
        );
    }

    #[test]
    fn test_standard_deviation() {
        let sd = run(
            StatisticalParameter::StandardDeviation,
            &ints(&[2, 4, 4, 4, 5, 5, 7, 9]),
        );
        assert!((sd.as_double() - 2.138089935299395).abs() < 1e-12);
        assert_eq!(
            run(StatisticalParameter::StandardDeviation, &ints(&[4])),
            NumericValue::Integer(0)
        );
        assert_eq!(
            run(StatisticalParameter::StandardDeviation, &ints(&[4, 4])),
            NumericValue::Integer(0)
        );
    }

    #[test]
    fn test_reset_reuses_accumulator() {
        let mut accumulator = StatisticalParameter::Maximum.fresh_accumulator();
        accumulator.append(NumericValue::Integer(10));
        accumulator.reset();
        accumulator.append(NumericValue::Integer(3));
        assert_eq!(accumulator.count(), 1);
        assert_eq!(accumulator.result(), NumericValue::Integer(3));
    }

    #[test]
    fn test_quantile_whole_rank_is_exact() {
        let values: Vec<NumericValue> = (0..=100).map(NumericValue::Integer).collect();
        let q29 = StatisticalParameter::quantile(29).unwrap();
        assert_eq!(run(q29, &values), NumericValue::Integer(29));

        // 7 values: rank 6 * 50 / 100 = 3
        let values: Vec<NumericValue> = (10..17).map(NumericValue::Integer).collect();
        let q50 = StatisticalParameter::quantile(50).unwrap();
        assert_eq!(run(q50, &values), NumericValue::Integer(13));
    }
}
