//! Immutable numeric matrices and the builder that produces them.
//!
//! A [`Matrix`] is a rectangular grid stored row-major in the
//! narrowest primitive type that holds all of its values exactly.
//! Matrices are created through a [`MatrixBuilder`] and never change
//! afterwards, so they can be shared freely between threads.

pub mod builder;
pub mod number;
mod storage;

pub use builder::MatrixBuilder;
pub use number::{NumericState, NumericValue, Scalar};
pub use storage::StorageKind;

use crate::utils::error::MatrixError;
use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use storage::Storage;

/// Immutable `m x n` grid of integer or floating values
#[derive(Debug, Clone)]
pub struct Matrix {
    storage: Storage,
    rows: usize,
    columns: usize,
}

impl Matrix {
    /// **Private** - only the builder creates matrices
    fn from_storage(storage: Storage, rows: usize, columns: usize) -> Self {
        debug_assert_eq!(storage.len(), rows * columns);
        Self {
            storage,
            rows,
            columns,
        }
    }

    /// A matrix without rows
    pub fn empty(columns: usize) -> Self {
        Self::from_storage(Storage::default(), 0, columns)
    }

    /// Build a matrix from rows of values
    ///
    /// # Errors
    /// * `MatrixError::SizeMismatch` - rows of different lengths
    pub fn from_rows<R, V>(rows: impl IntoIterator<Item = R>) -> Result<Self, MatrixError>
    where
        R: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        let mut builder = MatrixBuilder::new();
        let mut columns = None;
        let mut row_count = 0;

        for row in rows {
            let before = builder.len();
            for value in row {
                builder.append(value);
            }
            let width = builder.len() - before;
            match columns {
                None => {
                    columns = Some(width);
                    if width > 0 {
                        builder.set_column_count(width)?;
                    }
                }
                Some(expected) if expected != width => {
                    return Err(MatrixError::SizeMismatch {
                        expected: expected * (row_count + 1),
                        actual: builder.len(),
                        rows: row_count + 1,
                        columns: expected,
                    });
                }
                Some(_) => {}
            }
            row_count += 1;
        }

        match columns {
            None => Ok(Self::empty(0)),
            Some(0) => Ok(Self::from_storage(Storage::default(), row_count, 0)),
            Some(_) => builder.finalize(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.rows * self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Whether the cells are stored as integers
    pub fn is_integer_valued(&self) -> bool {
        self.storage.kind().is_integer()
    }

    /// Primitive type the cells are stored in
    pub fn storage_kind(&self) -> StorageKind {
        self.storage.kind()
    }

    fn index(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.rows && column < self.columns,
            "cell ({}, {}) outside {}x{} matrix",
            row,
            column,
            self.rows,
            self.columns
        );
        row * self.columns + column
    }

    /// Cell as a long; floating cells are truncated (saturating)
    ///
    /// # Panics
    /// If the cell lies outside the matrix.
    pub fn get_long(&self, row: usize, column: usize) -> i64 {
        self.storage.get_long(self.index(row, column))
    }

    /// Cell as a double
    ///
    /// # Panics
    /// If the cell lies outside the matrix.
    pub fn get_double(&self, row: usize, column: usize) -> f64 {
        self.storage.get_double(self.index(row, column))
    }

    /// Cell with its numeric state
    ///
    /// # Panics
    /// If the cell lies outside the matrix.
    pub fn get(&self, row: usize, column: usize) -> NumericValue {
        let index = self.index(row, column);
        if self.is_integer_valued() {
            NumericValue::Integer(self.storage.get_long(index))
        } else {
            NumericValue::from_f64(self.storage.get_double(index))
        }
    }

    /// Values of one row, left to right
    pub fn row(&self, row: usize) -> impl Iterator<Item = NumericValue> + '_ {
        (0..self.columns).map(move |column| self.get(row, column))
    }

    /// Values of one column, top to bottom
    pub fn column(&self, column: usize) -> impl Iterator<Item = NumericValue> + '_ {
        (0..self.rows).map(move |row| self.get(row, column))
    }

    /// All rows as vectors
    pub fn to_rows(&self) -> Vec<Vec<NumericValue>> {
        (0..self.rows).map(|row| self.row(row).collect()).collect()
    }
}

impl AsRef<Matrix> for Matrix {
    fn as_ref(&self) -> &Matrix {
        self
    }
}

/// Matrices are equal when their shapes agree and every cell holds the
/// same number, independent of the storage kind.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && (0..self.rows).all(|row| {
                (0..self.columns)
                    .all(|column| self.get(row, column).numeric_eq(&other.get(row, column)))
            })
    }
}

impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows))?;
        for row in 0..self.rows {
            let cells: Vec<NumericValue> = self.row(row).collect();
            seq.serialize_element(&cells)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Matrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<NumericValue>>::deserialize(deserializer)?;
        Matrix::from_rows(rows).map_err(serde::de::Error::custom)
    }
}
