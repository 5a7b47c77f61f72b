//! Query error types

use std::time::Duration;

/// Errors that can occur during query execution
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// Query execution failed
    #[error("query execution failed: {0}")]
    Execution(String),

    /// The backend did not answer in time
    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    /// Query could not be expressed for this backend
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// No data files found
    #[error("no data files found: {0}")]
    NoDataFiles(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<glob::PatternError> for QueryError {
    fn from(err: glob::PatternError) -> Self {
        QueryError::Config(format!("invalid glob pattern: {}", err))
    }
}

impl From<glob::GlobError> for QueryError {
    fn from(err: glob::GlobError) -> Self {
        QueryError::Io(std::io::Error::other(err.to_string()))
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Serialization(err.to_string())
    }
}
