//! Error types for Circadia.
//!
//! The engine itself never errors: missing data, empty datasets, and
//! out-of-range queries all resolve to empty or neutral results inside
//! cd-engine. The variants here cover the surface around the engine:
//! dataset loading, parsing, query-parameter validation, and output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Circadia operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Dataset loading and shape errors.
    Dataset,
    /// Query-parameter validation errors.
    Query,
    /// Configuration errors.
    Config,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Dataset => write!(f, "dataset"),
            ErrorCategory::Query => write!(f, "query"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for Circadia.
#[derive(Error, Debug)]
pub enum Error {
    // Dataset errors
    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("failed to parse dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no usable records in dataset (selected field: {field})")]
    EmptyDataset { field: String },

    // Query errors
    #[error("invalid query: {0}")]
    Query(String),

    #[error("day {day} outside dataset range 1..={max_day}")]
    DayOutOfRange { day: u32, max_day: u32 },

    // Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    // I/O errors
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// The category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Dataset(_) | Error::Parse(_) | Error::EmptyDataset { .. } => {
                ErrorCategory::Dataset
            }
            Error::Query(_) | Error::DayOutOfRange { .. } => ErrorCategory::Query,
            Error::Config(_) => ErrorCategory::Config,
            Error::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
