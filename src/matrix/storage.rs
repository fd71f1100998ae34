//! Backing storage of matrices and the promotion ladder.
//!
//! Storage starts as bytes and only ever widens:
//! byte -> short -> int -> long -> float -> double.
//! Every promotion consumes the old variant and returns the new one,
//! copying all stored values exactly.

use super::number::{f64_to_exact_i64, Scalar};
use crate::utils::config::GROWTH_PADDING;
use serde::{Deserialize, Serialize};

/// Representation tag of a storage, ordered from narrowest to widest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl StorageKind {
    pub fn is_integer(self) -> bool {
        self <= StorageKind::Long
    }

    /// Narrowest integer kind able to hold `value`
    fn for_long(value: i64) -> StorageKind {
        if i8::try_from(value).is_ok() {
            StorageKind::Byte
        } else if i16::try_from(value).is_ok() {
            StorageKind::Short
        } else if i32::try_from(value).is_ok() {
            StorageKind::Int
        } else {
            StorageKind::Long
        }
    }
}

/// Tagged union over the six primitive vectors
///
/// Promotion is exact with one exception: once the storage holds doubles,
/// longs beyond `2^53` in magnitude are rounded to the nearest double.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Storage {
    Bytes(Vec<i8>),
    Shorts(Vec<i16>),
    Ints(Vec<i32>),
    Longs(Vec<i64>),
    Floats(Vec<f32>),
    Doubles(Vec<f64>),
}

impl Default for Storage {
    fn default() -> Self {
        Storage::Bytes(Vec::new())
    }
}

/// A value after deciding whether it can live in integer storage
#[derive(Debug, Clone, Copy)]
enum Classified {
    Integer(i64),
    Floating(f64),
}

fn classify(value: Scalar) -> Classified {
    match value {
        Scalar::Integer(wide) => match i64::try_from(wide) {
            Ok(long) => Classified::Integer(long),
            Err(_) => Classified::Floating(wide as f64),
        },
        Scalar::Float(single) => classify_double(single as f64),
        Scalar::Double(double) => classify_double(double),
    }
}

fn classify_double(value: f64) -> Classified {
    match f64_to_exact_i64(value) {
        Some(long) => Classified::Integer(long),
        None => Classified::Floating(value),
    }
}

/// Does `value` survive a round trip through `f32`?
pub(crate) fn double_fits_float(value: f64) -> bool {
    value.is_nan() || (value as f32) as f64 == value
}

pub(crate) fn long_fits_float(value: i64) -> bool {
    let single = value as f32;
    // 2^63 saturates back to i64::MAX, so it needs an explicit range check
    (single as f64) < 9_223_372_036_854_775_808.0 && single as i64 == value
}

/// Make room for one more element, growing to `2 * (needed + padding)`
fn ensure_room<T>(values: &mut Vec<T>) {
    if values.len() == values.capacity() {
        let needed = values.len() + 1;
        let target = 2 * (needed + GROWTH_PADDING);
        values.reserve_exact(target - values.len());
    }
}

impl Storage {
    pub fn kind(&self) -> StorageKind {
        match self {
            Storage::Bytes(_) => StorageKind::Byte,
            Storage::Shorts(_) => StorageKind::Short,
            Storage::Ints(_) => StorageKind::Int,
            Storage::Longs(_) => StorageKind::Long,
            Storage::Floats(_) => StorageKind::Float,
            Storage::Doubles(_) => StorageKind::Double,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Storage::Bytes(v) => v.len(),
            Storage::Shorts(v) => v.len(),
            Storage::Ints(v) => v.len(),
            Storage::Longs(v) => v.len(),
            Storage::Floats(v) => v.len(),
            Storage::Doubles(v) => v.len(),
        }
    }

    pub fn capacity(&self) -> usize {
        match self {
            Storage::Bytes(v) => v.capacity(),
            Storage::Shorts(v) => v.capacity(),
            Storage::Ints(v) => v.capacity(),
            Storage::Longs(v) => v.capacity(),
            Storage::Floats(v) => v.capacity(),
            Storage::Doubles(v) => v.capacity(),
        }
    }

    pub fn get_long(&self, index: usize) -> i64 {
        match self {
            Storage::Bytes(v) => v[index] as i64,
            Storage::Shorts(v) => v[index] as i64,
            Storage::Ints(v) => v[index] as i64,
            Storage::Longs(v) => v[index],
            Storage::Floats(v) => v[index] as i64,
            Storage::Doubles(v) => v[index] as i64,
        }
    }

    pub fn get_double(&self, index: usize) -> f64 {
        match self {
            Storage::Bytes(v) => v[index] as f64,
            Storage::Shorts(v) => v[index] as f64,
            Storage::Ints(v) => v[index] as f64,
            Storage::Longs(v) => v[index] as f64,
            Storage::Floats(v) => v[index] as f64,
            Storage::Doubles(v) => v[index],
        }
    }

    /// Append one value, promoting first if the current kind cannot hold it
    pub fn push(&mut self, value: Scalar) {
        match classify(value) {
            Classified::Integer(long) => self.push_long(long),
            Classified::Floating(double) => self.push_double(double),
        }
    }

    fn push_long(&mut self, value: i64) {
        let kind = self.kind();
        if kind.is_integer() {
            let needed = StorageKind::for_long(value);
            if needed > kind {
                *self = std::mem::take(self).widen(needed);
            }
        } else if kind == StorageKind::Float && !long_fits_float(value) {
            *self = std::mem::take(self).widen(StorageKind::Double);
        }

        // After widening the value is known to fit the current kind
        match self {
            Storage::Bytes(v) => {
                ensure_room(v);
                v.push(value as i8);
            }
            Storage::Shorts(v) => {
                ensure_room(v);
                v.push(value as i16);
            }
            Storage::Ints(v) => {
                ensure_room(v);
                v.push(value as i32);
            }
            Storage::Longs(v) => {
                ensure_room(v);
                v.push(value);
            }
            Storage::Floats(v) => {
                ensure_room(v);
                v.push(value as f32);
            }
            Storage::Doubles(v) => {
                ensure_room(v);
                v.push(value as f64);
            }
        }
    }

    fn push_double(&mut self, value: f64) {
        let kind = self.kind();
        if kind < StorageKind::Double {
            let target = if double_fits_float(value) && self.fits_float() {
                StorageKind::Float
            } else {
                StorageKind::Double
            };
            if target > kind {
                *self = std::mem::take(self).widen(target);
            }
        }

        match self {
            Storage::Floats(v) => {
                ensure_room(v);
                v.push(value as f32);
            }
            Storage::Doubles(v) => {
                ensure_room(v);
                v.push(value);
            }
            // widen() above always leaves a floating kind here
            Storage::Bytes(_) | Storage::Shorts(_) | Storage::Ints(_) | Storage::Longs(_) => {
                *self = std::mem::take(self).widen(StorageKind::Double);
                self.push_double(value);
            }
        }
    }

    /// Can every stored value be represented exactly as `f32`?
    fn fits_float(&self) -> bool {
        match self {
            Storage::Bytes(_) | Storage::Shorts(_) | Storage::Floats(_) => true,
            Storage::Ints(v) => v.iter().all(|&x| long_fits_float(x as i64)),
            Storage::Longs(v) => v.iter().all(|&x| long_fits_float(x)),
            Storage::Doubles(v) => v.iter().all(|&x| double_fits_float(x)),
        }
    }

    /// Consume this storage and copy every value into the `target` kind.
    ///
    /// `target` must be at least as wide as the current kind and able to
    /// hold every stored value.
    fn widen(self, target: StorageKind) -> Storage {
        if target <= self.kind() {
            return self;
        }

        let capacity = self.capacity();
        match target {
            StorageKind::Byte => self,
            StorageKind::Short => Storage::Shorts(self.copy_longs(capacity, |x| x as i16)),
            StorageKind::Int => Storage::Ints(self.copy_longs(capacity, |x| x as i32)),
            StorageKind::Long => Storage::Longs(self.copy_longs(capacity, |x| x)),
            StorageKind::Float => Storage::Floats(self.copy_doubles(capacity, |x| x as f32)),
            StorageKind::Double => Storage::Doubles(self.copy_doubles(capacity, |x| x)),
        }
    }

    fn copy_longs<T>(self, capacity: usize, convert: impl Fn(i64) -> T) -> Vec<T> {
        let mut out = Vec::with_capacity(capacity);
        match self {
            Storage::Bytes(v) => out.extend(v.into_iter().map(|x| convert(x as i64))),
            Storage::Shorts(v) => out.extend(v.into_iter().map(|x| convert(x as i64))),
            Storage::Ints(v) => out.extend(v.into_iter().map(|x| convert(x as i64))),
            Storage::Longs(v) => out.extend(v.into_iter().map(convert)),
            Storage::Floats(v) => out.extend(v.into_iter().map(|x| convert(x as i64))),
            Storage::Doubles(v) => out.extend(v.into_iter().map(|x| convert(x as i64))),
        }
        out
    }

    fn copy_doubles<T>(self, capacity: usize, convert: impl Fn(f64) -> T) -> Vec<T> {
        let mut out = Vec::with_capacity(capacity);
        match self {
            Storage::Bytes(v) => out.extend(v.into_iter().map(|x| convert(x as f64))),
            Storage::Shorts(v) => out.extend(v.into_iter().map(|x| convert(x as f64))),
            Storage::Ints(v) => out.extend(v.into_iter().map(|x| convert(x as f64))),
            Storage::Longs(v) => out.extend(v.into_iter().map(|x| convert(x as f64))),
            Storage::Floats(v) => out.extend(v.into_iter().map(|x| convert(x as f64))),
            Storage::Doubles(v) => out.extend(v.into_iter().map(convert)),
        }
        out
    }

    /// Release unused capacity once no more values will be appended
    pub fn shrink_to_fit(&mut self) {
        match self {
            Storage::Bytes(v) => v.shrink_to_fit(),
            Storage::Shorts(v) => v.shrink_to_fit(),
            Storage::Ints(v) => v.shrink_to_fit(),
            Storage::Longs(v) => v.shrink_to_fit(),
            Storage::Floats(v) => v.shrink_to_fit(),
            Storage::Doubles(v) => v.shrink_to_fit(),
        }
    }
}
