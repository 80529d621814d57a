use thiserror::Error;

use crate::table::ColumnRole;

/// Error type shared by every tabstats operation
#[derive(Error, Debug)]
pub enum Error {
    #[error("column not found: {0}")]
    UnknownColumn(String),

    #[error("insufficient data in column '{column}': need at least {required} value(s), found {actual}")]
    InsufficientData {
        column: String,
        required: usize,
        actual: usize,
    },

    #[error("column '{column}' is {found}, expected {expected}")]
    ColumnRoleMismatch {
        column: String,
        expected: ColumnRole,
        found: ColumnRole,
    },

    #[error("duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("row {row} has {found} cells, expected {expected}")]
    InconsistentRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell in column '{column}' at row {row}: {message}")]
    InvalidCell {
        column: String,
        row: usize,
        message: String,
    },

    #[error("length mismatch: expected {expected}, found {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("no data: {0}")]
    EmptyData(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("visualization error: {0}")]
    Visualization(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(feature = "visualization")]
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for Error
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Visualization(format!("drawing failed: {}", err))
    }
}
