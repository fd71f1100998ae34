//! Append-only builder that picks the smallest exact storage.
//!
//! Values are appended in row-major order. The builder widens its
//! storage as needed and is finalized exactly once into an immutable
//! [`Matrix`].

use super::number::Scalar;
use super::storage::{Storage, StorageKind};
use super::Matrix;
use crate::utils::error::{MatrixError, ScalarParseError};
use log::trace;

/// Typed growable buffer behind every [`Matrix`]
///
/// **Public** - used by the curve aggregator, the run loader and tests
#[derive(Debug, Default)]
pub struct MatrixBuilder {
    storage: Storage,
    rows: Option<usize>,
    columns: Option<usize>,
}

impl MatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with the column count already fixed
    pub fn with_columns(columns: usize) -> Result<Self, MatrixError> {
        let mut builder = Self::new();
        builder.set_column_count(columns)?;
        Ok(builder)
    }

    /// Fix the number of rows; may be called once
    ///
    /// # Errors
    /// * `MatrixError::RowCountAlreadySet` - called a second time
    /// * `MatrixError::TooManyElements` - more values stored than fit
    pub fn set_row_count(&mut self, rows: usize) -> Result<(), MatrixError> {
        if let Some(existing) = self.rows {
            return Err(MatrixError::RowCountAlreadySet(existing));
        }
        if let Some(columns) = self.columns {
            self.check_capacity(rows, columns)?;
        }
        self.rows = Some(rows);
        Ok(())
    }

    /// Fix the number of columns; may be called once and must be positive
    ///
    /// # Errors
    /// * `MatrixError::ColumnCountAlreadySet` - called a second time
    /// * `MatrixError::ZeroDimension` - `columns` is zero
    /// * `MatrixError::TooManyElements` - more values stored than fit
    pub fn set_column_count(&mut self, columns: usize) -> Result<(), MatrixError> {
        if let Some(existing) = self.columns {
            return Err(MatrixError::ColumnCountAlreadySet(existing));
        }
        if columns == 0 {
            return Err(MatrixError::ZeroDimension(columns));
        }
        if let Some(rows) = self.rows {
            self.check_capacity(rows, columns)?;
        }
        self.columns = Some(columns);
        Ok(())
    }

    fn check_capacity(&self, rows: usize, columns: usize) -> Result<(), MatrixError> {
        let stored = self.storage.len();
        match rows.checked_mul(columns) {
            Some(size) if stored > size => Err(MatrixError::TooManyElements {
                stored,
                rows,
                columns,
            }),
            _ => Ok(()),
        }
    }

    /// Append exactly one value. Never fails.
    pub fn append(&mut self, value: impl Into<Scalar>) {
        let before = self.storage.kind();
        self.storage.push(value.into());
        let after = self.storage.kind();
        if after != before {
            trace!(
                "Promoted matrix storage {:?} -> {:?} at {} elements",
                before,
                after,
                self.storage.len()
            );
        }
    }

    /// Parse a numeric string and append it
    ///
    /// Nothing is appended if parsing fails.
    pub fn append_str(&mut self, text: &str) -> Result<(), ScalarParseError> {
        let value: Scalar = text.parse()?;
        self.append(value);
        Ok(())
    }

    /// Number of values appended so far
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    /// Current representation of the stored values
    pub fn storage_kind(&self) -> StorageKind {
        self.storage.kind()
    }

    /// Turn the buffer into an immutable matrix
    ///
    /// Unset dimensions are inferred from the element count; with no
    /// dimension fixed the result is a single column.
    ///
    /// # Errors
    /// * `MatrixError::SizeMismatch` - both dimensions fixed but the count differs
    /// * `MatrixError::UnevenElementCount` - count not divisible by the fixed dimension
    pub fn finalize(self) -> Result<Matrix, MatrixError> {
        let count = self.storage.len();
        let (rows, columns) = match (self.rows, self.columns) {
            (Some(rows), Some(columns)) => {
                if rows.checked_mul(columns) != Some(count) {
                    return Err(MatrixError::SizeMismatch {
                        expected: rows.saturating_mul(columns),
                        actual: count,
                        rows,
                        columns,
                    });
                }
                (rows, columns)
            }
            (Some(rows), None) => {
                if rows == 0 {
                    if count != 0 {
                        return Err(MatrixError::UnevenElementCount {
                            count,
                            fixed: rows,
                            axis: "rows",
                        });
                    }
                    (0, 1)
                } else if count % rows != 0 {
                    return Err(MatrixError::UnevenElementCount {
                        count,
                        fixed: rows,
                        axis: "rows",
                    });
                } else {
                    (rows, count / rows)
                }
            }
            (None, Some(columns)) => {
                if count % columns != 0 {
                    return Err(MatrixError::UnevenElementCount {
                        count,
                        fixed: columns,
                        axis: "columns",
                    });
                }
                (count / columns, columns)
            }
            (None, None) => (count, 1),
        };

        let mut storage = self.storage;
        storage.shrink_to_fit();
        Ok(Matrix::from_storage(storage, rows, columns))
    }
}
