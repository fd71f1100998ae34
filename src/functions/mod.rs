//! Unary functions used to transform axes before and after aggregation.
//!
//! Functions are plain values: they compare, hash and print, so they can
//! take part in the identity of a curve aggregation.

use crate::matrix::NumericValue;
use crate::utils::error::ConfigError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A function `f64 -> f64`
#[derive(Debug, Clone, Copy, Default)]
pub enum UnaryFunction {
    #[default]
    Identity,
    Negate,
    Absolute,
    Ln,
    Log2,
    Log10,
    Exp,
    Sqrt,
    Square,
    Reciprocal,
    /// Multiply by a constant
    Scale(f64),
    /// Add a constant
    Shift(f64),
}

impl UnaryFunction {
    pub fn apply(&self, x: f64) -> f64 {
        match *self {
            UnaryFunction::Identity => x,
            UnaryFunction::Negate => -x,
            UnaryFunction::Absolute => x.abs(),
            UnaryFunction::Ln => x.ln(),
            UnaryFunction::Log2 => x.log2(),
            UnaryFunction::Log10 => x.log10(),
            UnaryFunction::Exp => x.exp(),
            UnaryFunction::Sqrt => x.sqrt(),
            UnaryFunction::Square => x * x,
            UnaryFunction::Reciprocal => 1.0 / x,
            UnaryFunction::Scale(factor) => x * factor,
            UnaryFunction::Shift(offset) => x + offset,
        }
    }

    /// Apply to a value while keeping its numeric state meaningful.
    ///
    /// Integer inputs stay integers where the result is exact. An infinite
    /// result from a finite input is an overflow, except at the poles of
    /// the logarithms and the reciprocal where infinity is the true result.
    pub fn apply_value(&self, value: NumericValue) -> NumericValue {
        if self.is_identity() || value.is_no_value() {
            return value;
        }

        if let NumericValue::Integer(long) = value {
            if let Some(exact) = self.apply_exact(long) {
                return NumericValue::Integer(exact);
            }
        }

        let input = value.as_double();
        let output = self.apply(input);
        let propagate_overflow = matches!(
            value,
            NumericValue::PositiveOverflow | NumericValue::NegativeOverflow
        );

        if (value.is_finite() && !self.is_pole(input)) || propagate_overflow {
            NumericValue::from_finite_computation(output)
        } else {
            NumericValue::from_f64(output)
        }
    }

    /// Integer result of applying to an integer, if it is exact
    fn apply_exact(&self, x: i64) -> Option<i64> {
        match *self {
            UnaryFunction::Identity => Some(x),
            UnaryFunction::Negate => x.checked_neg(),
            UnaryFunction::Absolute => x.checked_abs(),
            UnaryFunction::Square => x.checked_mul(x),
            UnaryFunction::Shift(offset) if offset.fract() == 0.0 && offset.abs() < 4.5e15 => {
                x.checked_add(offset as i64)
            }
            UnaryFunction::Scale(factor) if factor.fract() == 0.0 && factor.abs() < 4.5e15 => {
                x.checked_mul(factor as i64)
            }
            _ => None,
        }
    }

    fn is_pole(&self, x: f64) -> bool {
        x == 0.0
            && matches!(
                self,
                UnaryFunction::Ln
                    | UnaryFunction::Log2
                    | UnaryFunction::Log10
                    | UnaryFunction::Reciprocal
            )
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, UnaryFunction::Identity)
    }

    /// Whether the function turns an increasing axis into a decreasing one
    pub fn reverses_order(&self) -> bool {
        match *self {
            UnaryFunction::Negate | UnaryFunction::Reciprocal => true,
            UnaryFunction::Scale(factor) => factor < 0.0,
            _ => false,
        }
    }

    /// Render the function applied to `argument`, e.g. `log10(time)`
    pub fn render(&self, argument: &str) -> String {
        match *self {
            UnaryFunction::Identity => argument.to_string(),
            UnaryFunction::Negate => format!("-{}", argument),
            UnaryFunction::Absolute => format!("|{}|", argument),
            UnaryFunction::Square => format!("{}^2", argument),
            UnaryFunction::Reciprocal => format!("1/{}", argument),
            UnaryFunction::Scale(factor) => format!("{}*{}", factor, argument),
            UnaryFunction::Shift(offset) if offset < 0.0 => format!("{}-{}", argument, -offset),
            UnaryFunction::Shift(offset) => format!("{}+{}", argument, offset),
            _ => format!("{}({})", self.name(), argument),
        }
    }

    /// Short name used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            UnaryFunction::Identity => "identity",
            UnaryFunction::Negate => "negate",
            UnaryFunction::Absolute => "abs",
            UnaryFunction::Ln => "ln",
            UnaryFunction::Log2 => "log2",
            UnaryFunction::Log10 => "log10",
            UnaryFunction::Exp => "exp",
            UnaryFunction::Sqrt => "sqrt",
            UnaryFunction::Square => "square",
            UnaryFunction::Reciprocal => "reciprocal",
            UnaryFunction::Scale(_) => "scale",
            UnaryFunction::Shift(_) => "shift",
        }
    }

    fn constant(&self) -> Option<f64> {
        match *self {
            UnaryFunction::Scale(value) | UnaryFunction::Shift(value) => Some(value),
            _ => None,
        }
    }
}

// Constants compare by bit pattern so that Eq and Hash agree
impl PartialEq for UnaryFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
            && self.constant().map(f64::to_bits) == other.constant().map(f64::to_bits)
    }
}

impl Eq for UnaryFunction {}

impl Hash for UnaryFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.constant().map(f64::to_bits).hash(state);
    }
}

impl fmt::Display for UnaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.constant() {
            Some(value) => write!(f, "{}({})", self.name(), value),
            None => write!(f, "{}", self.name()),
        }
    }
}

impl FromStr for UnaryFunction {
    type Err = ConfigError;

    /// Parse names like `log10`, `abs` or `scale(2.5)`
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim().to_ascii_lowercase();
        let unknown = || ConfigError::UnknownTransform(text.clone());

        if let Some((name, rest)) = text.split_once('(') {
            let argument = rest.strip_suffix(')').ok_or_else(unknown)?;
            let value: f64 = argument.trim().parse().map_err(|_| unknown())?;
            if !value.is_finite() {
                return Err(unknown());
            }
            return match name.trim() {
                "scale" => Ok(UnaryFunction::Scale(value)),
                "shift" => Ok(UnaryFunction::Shift(value)),
                _ => Err(unknown()),
            };
        }

        match text.as_str() {
            "" | "identity" | "id" => Ok(UnaryFunction::Identity),
            "negate" | "neg" => Ok(UnaryFunction::Negate),
            "abs" | "absolute" => Ok(UnaryFunction::Absolute),
            "ln" => Ok(UnaryFunction::Ln),
            "log2" | "ld" => Ok(UnaryFunction::Log2),
            "log10" | "lg" => Ok(UnaryFunction::Log10),
            "exp" => Ok(UnaryFunction::Exp),
            "sqrt" => Ok(UnaryFunction::Sqrt),
            "square" | "sqr" => Ok(UnaryFunction::Square),
            "reciprocal" | "inv" => Ok(UnaryFunction::Reciprocal),
            _ => Err(unknown()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::NumericState;
    use std::collections::HashSet;

    #[test]
    fn test_identity_keeps_value() {
        let value = NumericValue::PositiveOverflow;
        assert_eq!(
            UnaryFunction::Identity.apply_value(value).state(),
            NumericState::PositiveOverflow
        );
    }

    #[test]
    fn test_integer_paths_stay_exact() {
        assert_eq!(
            UnaryFunction::Negate.apply_value(NumericValue::Integer(7)),
            NumericValue::Integer(-7)
        );
        assert_eq!(
            UnaryFunction::Scale(3.0).apply_value(NumericValue::Integer(7)),
            NumericValue::Integer(21)
        );
        assert_eq!(
            UnaryFunction::Negate.apply_value(NumericValue::Integer(i64::MIN)),
            NumericValue::Double(9_223_372_036_854_775_808.0)
        );
    }

    #[test]
    fn test_overflow_and_poles() {
        assert_eq!(
            UnaryFunction::Exp.apply_value(NumericValue::Integer(1000)).state(),
            NumericState::PositiveOverflow
        );
        assert_eq!(
            UnaryFunction::Log10.apply_value(NumericValue::Integer(0)).state(),
            NumericState::NegativeInfinity
        );
        assert_eq!(
            UnaryFunction::Negate.apply_value(NumericValue::PositiveOverflow).state(),
            NumericState::NegativeOverflow
        );
        assert!(UnaryFunction::Ln
            .apply_value(NumericValue::Integer(-1))
            .is_no_value());
    }

    #[test]
    fn test_parse_and_display() {
        for text in ["identity", "log10", "scale(2.5)", "shift(-1)", "reciprocal"] {
            let function: UnaryFunction = text.parse().unwrap();
            assert_eq!(function.to_string(), text);
        }
        assert!("log7".parse::<UnaryFunction>().is_err());
        assert!("scale(x)".parse::<UnaryFunction>().is_err());
    }

    #[test]
    fn test_render() {
        assert_eq!(UnaryFunction::Log10.render("time"), "log10(time)");
        assert_eq!(UnaryFunction::Negate.render("f"), "-f");
        assert_eq!(UnaryFunction::Shift(-1.0).render("f"), "f-1");
    }

    #[test]
    fn test_equality_and_hash() {
        let mut set = HashSet::new();
        set.insert(UnaryFunction::Scale(2.0));
        assert!(set.contains(&UnaryFunction::Scale(2.0)));
        assert!(!set.contains(&UnaryFunction::Scale(3.0)));
        assert!(!set.contains(&UnaryFunction::Shift(2.0)));
    }

    #[test]
    fn test_reverses_order() {
        assert!(UnaryFunction::Negate.reverses_order());
        assert!(UnaryFunction::Scale(-2.0).reverses_order());
        assert!(!UnaryFunction::Log10.reverses_order());
    }
}
