//! Error types for fitbit-tabulate

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading exports or writing tables
#[derive(Debug, Error)]
pub enum TabulateError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has {found} lines, expected a preamble of {expected}")]
    PreambleTooShort {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("No JSON document found in {path}")]
    NoJsonBody { path: PathBuf },

    #[error("Top-level JSON value in {path} is not an object")]
    NotAnObject { path: PathBuf },

    #[error("Missing required field {field} in {path}")]
    MissingField { path: PathBuf, field: String },

    #[error("Field {field} in {path} is not {expected}")]
    UnexpectedType {
        path: PathBuf,
        field: String,
        expected: &'static str,
    },

    #[error("Date parse error for {value:?}: {reason}")]
    DateParse { value: String, reason: String },

    #[error("Sampling interval out of range: {0}")]
    IntervalOutOfRange(String),

    #[error("Unsupported interval unit: {0}")]
    UnsupportedIntervalUnit(String),

    #[error("Intraday dataset in {path} is empty")]
    EmptyDataset { path: PathBuf },

    #[error("No resting heart rate entries could be extracted from {path}")]
    NoRestingHeartEntries { path: PathBuf },

    #[error("Row {row} does not match columns {expected:?} (found {actual:?})")]
    SchemaMismatch {
        row: usize,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("Unknown activity: {0}")]
    UnknownActivity(String),
}

impl TabulateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TabulateError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing(path: impl Into<PathBuf>, field: impl Into<String>) -> Self {
        TabulateError::MissingField {
            path: path.into(),
            field: field.into(),
        }
    }
}
