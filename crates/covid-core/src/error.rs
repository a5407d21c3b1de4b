//! Centralized error types for the COVID-19 graph.

use std::time::Duration;

use thiserror::Error;

/// Main error type for query, ingestion and configuration failures.
#[derive(Error, Debug)]
pub enum CovidError {
    /// The graph backend rejected or failed a statement. Carries the driver text.
    #[error("{0}")]
    Query(String),

    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("invalid {field} '{value}': {reason}")]
    Parse {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("missing column {index} ({field})")]
    MissingColumn { index: usize, field: &'static str },

    #[error("load aborted at {file}:{line}: {reason}")]
    Aborted { file: String, line: u64, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for graph operations.
pub type CovidResult<T> = Result<T, CovidError>;

impl CovidError {
    /// Create a query error from any displayable driver error.
    pub fn query(err: impl std::fmt::Display) -> Self {
        Self::Query(err.to_string())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn parse(field: &'static str, value: &str, reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
