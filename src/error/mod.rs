//! Error handling for the dashboard pipeline.

pub mod util;

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use sea_orm::DbErr;

/// Specialized error type for dashboard operations
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Error opening or querying the database
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Error building or transforming Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error converting records to or from Arrow
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error opening or reading a file
    #[error("IO error: {message}{}", path_suffix(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<io::Error>,
    },

    /// A required column is missing from a table
    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A column does not have the expected Arrow type
    #[error("Column '{column}' is not a {expected} array")]
    InvalidDataType { column: String, expected: String },

    /// Error evaluating a filter expression
    #[error("Filter error: {0}")]
    Filter(String),

    /// Error loading or parsing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unrecognised or malformed session command
    #[error("Invalid command: {0}")]
    Command(String),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

impl DashboardError {
    /// Create an IO error without an underlying source
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: None,
        }
    }

    /// Create an IO error wrapping an `io::Error`
    pub fn io_error_with_source(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
            source: Some(source),
        }
    }

    /// Attach a path to an IO error; other variants are returned unchanged
    #[must_use]
    pub fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Io {
                message, source, ..
            } => Self::Io {
                message,
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        }
    }

    pub fn filter_error(message: impl Into<String>) -> Self {
        Self::Filter(message.into())
    }
}

impl From<io::Error> for DashboardError {
    fn from(error: io::Error) -> Self {
        Self::io_error_with_source(error.to_string(), error)
    }
}

impl From<serde_arrow::Error> for DashboardError {
    fn from(error: serde_arrow::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
