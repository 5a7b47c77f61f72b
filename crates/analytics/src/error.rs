//! Analytics error types

use thiserror::Error;

/// Analytics errors
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Unknown period class
    #[error("invalid period: {0}")]
    InvalidPeriod(String),

    /// Unknown object set
    #[error("invalid object set: {0}")]
    InvalidObjectSet(String),

    /// Environment outside the configured allow-list
    #[error("invalid environment '{0}': not in the configured allow-list")]
    InvalidEnvironment(String),

    /// Category pattern that does not compile or lacks a named group
    #[error("invalid category pattern: {0}")]
    InvalidPattern(String),

    /// Query execution failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Backend error (from egress-query)
    #[error("backend error: {0}")]
    Backend(#[from] egress_query::QueryError),
}

impl From<egress_query::ParseObjectSetError> for AnalyticsError {
    fn from(err: egress_query::ParseObjectSetError) -> Self {
        Self::InvalidObjectSet(err.0)
    }
}

/// Result type for analytics operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
