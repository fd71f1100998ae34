//! Scalar values flowing into and out of matrices.
//!
//! A [`NumericValue`] is what a matrix cell, a source row or an
//! accumulator produces. A [`Scalar`] is what a [`MatrixBuilder`]
//! accepts.
//!
//! [`MatrixBuilder`]: super::MatrixBuilder

use crate::utils::error::ScalarParseError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// 2^63 as a double, the first value above the `i64` range
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// State tag of a [`NumericValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericState {
    NoValue,
    Integer,
    Double,
    PositiveOverflow,
    NegativeOverflow,
    PositiveInfinity,
    NegativeInfinity,
}

/// A single number together with its numeric state
///
/// Overflow means "a finite computation exceeded the representable
/// range". It is written out exactly like the matching infinity.
#[derive(Debug, Clone, Copy)]
pub enum NumericValue {
    NoValue,
    Integer(i64),
    Double(f64),
    PositiveOverflow,
    NegativeOverflow,
    PositiveInfinity,
    NegativeInfinity,
}

impl NumericValue {
    /// Classify a double: NaN has no value, infinities keep their sign
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            NumericValue::NoValue
        } else if value == f64::INFINITY {
            NumericValue::PositiveInfinity
        } else if value == f64::NEG_INFINITY {
            NumericValue::NegativeInfinity
        } else {
            NumericValue::Double(value)
        }
    }

    /// Classify the result of a computation whose inputs were all finite.
    ///
    /// An infinite result then means the computation overflowed.
    pub fn from_finite_computation(value: f64) -> Self {
        if value == f64::INFINITY {
            NumericValue::PositiveOverflow
        } else if value == f64::NEG_INFINITY {
            NumericValue::NegativeOverflow
        } else {
            Self::from_f64(value)
        }
    }

    /// Like [`from_f64`](Self::from_f64), but integral values inside the
    /// `i64` range become integers when `integral_inputs` is set.
    pub fn settle(value: f64, integral_inputs: bool) -> Self {
        if integral_inputs {
            if let Some(long) = f64_to_exact_i64(value) {
                return NumericValue::Integer(long);
            }
        }
        Self::from_f64(value)
    }

    pub fn state(&self) -> NumericState {
        match self {
            NumericValue::NoValue => NumericState::NoValue,
            NumericValue::Integer(_) => NumericState::Integer,
            NumericValue::Double(_) => NumericState::Double,
            NumericValue::PositiveOverflow => NumericState::PositiveOverflow,
            NumericValue::NegativeOverflow => NumericState::NegativeOverflow,
            NumericValue::PositiveInfinity => NumericState::PositiveInfinity,
            NumericValue::NegativeInfinity => NumericState::NegativeInfinity,
        }
    }

    /// Value as a long; doubles are truncated and everything else saturates
    pub fn as_long(&self) -> i64 {
        match *self {
            NumericValue::NoValue => 0,
            NumericValue::Integer(value) => value,
            NumericValue::Double(value) => value as i64,
            NumericValue::PositiveOverflow | NumericValue::PositiveInfinity => i64::MAX,
            NumericValue::NegativeOverflow | NumericValue::NegativeInfinity => i64::MIN,
        }
    }

    /// Value as a double; overflow maps to infinity, no value to NaN
    pub fn as_double(&self) -> f64 {
        match *self {
            NumericValue::NoValue => f64::NAN,
            NumericValue::Integer(value) => value as f64,
            NumericValue::Double(value) => value,
            NumericValue::PositiveOverflow | NumericValue::PositiveInfinity => f64::INFINITY,
            NumericValue::NegativeOverflow | NumericValue::NegativeInfinity => f64::NEG_INFINITY,
        }
    }

    pub fn is_no_value(&self) -> bool {
        matches!(self, NumericValue::NoValue)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, NumericValue::Integer(_))
    }

    /// True for both infinities and both overflow states
    pub fn is_infinite(&self) -> bool {
        matches!(
            self,
            NumericValue::PositiveOverflow
                | NumericValue::NegativeOverflow
                | NumericValue::PositiveInfinity
                | NumericValue::NegativeInfinity
        )
    }

    /// True for integers and finite doubles
    pub fn is_finite(&self) -> bool {
        matches!(self, NumericValue::Integer(_) | NumericValue::Double(_))
    }

    /// The value as it is persisted: overflow collapses to infinity
    pub fn persisted(self) -> Self {
        match self {
            NumericValue::PositiveOverflow => NumericValue::PositiveInfinity,
            NumericValue::NegativeOverflow => NumericValue::NegativeInfinity,
            other => other,
        }
    }

    /// Exact identity check: same state and, for numbers, the same value.
    ///
    /// Doubles are compared by total order, so `0.0` and `-0.0` differ and
    /// there is no tolerance.
    pub fn same_as(&self, other: &NumericValue) -> bool {
        match (self, other) {
            (NumericValue::Integer(a), NumericValue::Integer(b)) => a == b,
            (NumericValue::Double(a), NumericValue::Double(b)) => a.total_cmp(b) == Ordering::Equal,
            (a, b) => a.state() == b.state() && !a.is_finite(),
        }
    }

    /// Numeric ordering across states; `None` if either side has no value.
    ///
    /// Integers and doubles compare exactly, overflow orders like infinity.
    pub fn numeric_cmp(&self, other: &NumericValue) -> Option<Ordering> {
        match (*self, *other) {
            (NumericValue::NoValue, _) | (_, NumericValue::NoValue) => None,
            (NumericValue::Integer(a), NumericValue::Integer(b)) => Some(a.cmp(&b)),
            (NumericValue::Integer(a), NumericValue::Double(b)) => Some(compare_i64_f64(a, b)),
            (NumericValue::Double(a), NumericValue::Integer(b)) => {
                Some(compare_i64_f64(b, a).reverse())
            }
            (a, b) => a.as_double().partial_cmp(&b.as_double()),
        }
    }

    /// Numeric equality; integers and doubles of equal value match
    pub fn numeric_eq(&self, other: &NumericValue) -> bool {
        match self.numeric_cmp(other) {
            Some(ordering) => ordering == Ordering::Equal,
            None => self.is_no_value() && other.is_no_value(),
        }
    }

    /// +1 for positive infinities and overflows, -1 for negative ones, else 0
    pub(crate) fn infinity_sign(&self) -> i8 {
        match self {
            NumericValue::PositiveOverflow | NumericValue::PositiveInfinity => 1,
            NumericValue::NegativeOverflow | NumericValue::NegativeInfinity => -1,
            _ => 0,
        }
    }
}

impl PartialEq for NumericValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Default for NumericValue {
    fn default() -> Self {
        NumericValue::NoValue
    }
}

impl From<i64> for NumericValue {
    fn from(value: i64) -> Self {
        NumericValue::Integer(value)
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        NumericValue::from_f64(value)
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::NoValue => write!(f, "NaN"),
            NumericValue::Integer(value) => write!(f, "{}", value),
            NumericValue::Double(value) => write!(f, "{}", value),
            NumericValue::PositiveOverflow | NumericValue::PositiveInfinity => write!(f, "inf"),
            NumericValue::NegativeOverflow | NumericValue::NegativeInfinity => write!(f, "-inf"),
        }
    }
}

// JSON has no NaN or infinity: no value becomes null, infinities become
// the strings "inf" / "-inf".
impl Serialize for NumericValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            NumericValue::NoValue => serializer.serialize_none(),
            NumericValue::Integer(value) => serializer.serialize_i64(value),
            NumericValue::Double(value) => serializer.serialize_f64(value),
            NumericValue::PositiveOverflow | NumericValue::PositiveInfinity => {
                serializer.serialize_str("inf")
            }
            NumericValue::NegativeOverflow | NumericValue::NegativeInfinity => {
                serializer.serialize_str("-inf")
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CellRepr {
    Integer(i64),
    Double(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for NumericValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<CellRepr>::deserialize(deserializer)? {
            None => Ok(NumericValue::NoValue),
            Some(CellRepr::Integer(value)) => Ok(NumericValue::Integer(value)),
            Some(CellRepr::Double(value)) => Ok(NumericValue::from_f64(value)),
            Some(CellRepr::Text(text)) => text
                .parse::<Scalar>()
                .map(Scalar::to_numeric_value)
                .map_err(de::Error::custom),
        }
    }
}

/// A value accepted by [`MatrixBuilder::append`](super::MatrixBuilder::append)
///
/// Every integer width converts losslessly into `Integer`; values
/// outside the 64-bit range are handled by the builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Integer(i128),
    Float(f32),
    Double(f64),
}

impl Scalar {
    /// Interpret this scalar as a numeric value.
    ///
    /// Integers beyond the `i64` range become doubles.
    pub fn to_numeric_value(self) -> NumericValue {
        match self {
            Scalar::Integer(value) => match i64::try_from(value) {
                Ok(long) => NumericValue::Integer(long),
                Err(_) => NumericValue::from_f64(value as f64),
            },
            Scalar::Float(value) => NumericValue::from_f64(value as f64),
            Scalar::Double(value) => NumericValue::from_f64(value),
        }
    }
}

macro_rules! scalar_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::Integer(value as i128)
                }
            }
        )*
    };
}

scalar_from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64, isize, usize);

impl From<u128> for Scalar {
    fn from(value: u128) -> Self {
        match i128::try_from(value) {
            Ok(signed) => Scalar::Integer(signed),
            Err(_) => Scalar::Double(value as f64),
        }
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Double(value)
    }
}

impl From<NumericValue> for Scalar {
    fn from(value: NumericValue) -> Self {
        match value {
            NumericValue::Integer(long) => Scalar::Integer(long as i128),
            other => Scalar::Double(other.as_double()),
        }
    }
}

impl FromStr for Scalar {
    type Err = ScalarParseError;

    /// Signed digit strings parse as integers, everything else as a double
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ScalarParseError::Empty);
        }

        let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(value) = text.parse::<i128>() {
                return Ok(Scalar::Integer(value));
            }
        }

        text.parse::<f64>()
            .map(Scalar::Double)
            .map_err(|_| ScalarParseError::Malformed(text.to_string()))
    }
}

/// The integer an integral double stands for, if it lies inside `i64`
pub(crate) fn f64_to_exact_i64(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value >= -TWO_POW_63 && value < TWO_POW_63 {
        Some(value as i64)
    } else {
        None
    }
}

/// Exact comparison of a long against a double without rounding the long
fn compare_i64_f64(long: i64, double: f64) -> Ordering {
    if double.is_nan() {
        return Ordering::Less;
    }
    if double >= TWO_POW_63 {
        return Ordering::Less;
    }
    if double < -TWO_POW_63 {
        return Ordering::Greater;
    }

    let whole = double.trunc();
    match long.cmp(&(whole as i64)) {
        Ordering::Equal => {
            let fraction = double - whole;
            if fraction > 0.0 {
                Ordering::Less
            } else if fraction < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        other => other,
    }
}
