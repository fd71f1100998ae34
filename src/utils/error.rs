//! Error types for the entire library.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Overflow, NaN and infinity inside the data are never errors. They are
//! numeric states and travel through the matrices as IEEE values.

use thiserror::Error;

/// Illegal-state errors raised by the growable matrix buffer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("Row count already set to {0}")]
    RowCountAlreadySet(usize),

    #[error("Column count already set to {0}")]
    ColumnCountAlreadySet(usize),

    #[error("Dimension must be positive, got {0}")]
    ZeroDimension(usize),

    #[error("{stored} elements already stored, cannot shrink to {rows}x{columns}")]
    TooManyElements {
        stored: usize,
        rows: usize,
        columns: usize,
    },

    #[error("{count} elements cannot be arranged with {fixed} {axis}")]
    UnevenElementCount {
        count: usize,
        fixed: usize,
        axis: &'static str,
    },

    #[error("Expected {expected} elements for a {rows}x{columns} matrix, got {actual}")]
    SizeMismatch {
        expected: usize,
        actual: usize,
        rows: usize,
        columns: usize,
    },
}

/// Errors that can occur while parsing a numeric string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScalarParseError {
    #[error("Empty numeric string")]
    Empty,

    #[error("Not a number: {0}")]
    Malformed(String),
}

/// Argument errors raised while building a curve aggregation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing x dimension")]
    MissingXDimension,

    #[error("Missing y dimension")]
    MissingYDimension,

    #[error("Missing primary statistical parameter")]
    MissingPrimaryParameter,

    #[error("x and y dimension share column {0}")]
    SameDimension(usize),

    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("Unknown statistical parameter: {0}")]
    UnknownParameter(String),

    #[error("Quantile must lie in 0..=100 percent, got {0}")]
    QuantileOutOfRange(u32),

    #[error("Unknown transform: {0}")]
    UnknownTransform(String),
}

/// Errors that can occur while computing a curve
#[derive(Error, Debug)]
pub enum CurveError {
    #[error("Cannot aggregate a curve over element kind '{0}'")]
    UnsupportedElement(&'static str),

    #[error("Column {column} out of range for a matrix with {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("Matrix construction failed: {0}")]
    Matrix(#[from] MatrixError),
}

/// Errors that can occur while reading input files
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid run data format: {0}")]
    InvalidFormat(String),

    #[error("Invalid numeric cell: {0}")]
    InvalidNumber(#[from] ScalarParseError),

    #[error("Matrix construction failed: {0}")]
    Matrix(#[from] MatrixError),

    #[error("Invalid curve definition: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
