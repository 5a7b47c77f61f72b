//! Egress Query - access history retrieval for egress analytics
//!
//! Provides a unified interface over the places access history can come from:
//! - **Local**: newline-delimited JSON exports on disk
//! - **Memory**: records already held by the caller
//!
//! # Usage
//!
//! ```ignore
//! use egress_query::{EventScan, ObjectSet, QueryConfig, QueryEngine};
//!
//! let config = QueryConfig::local("/var/lib/egress").with_timeout_secs(30);
//! let engine = QueryEngine::from_query_config(&config)?;
//!
//! let events = engine.scan(&EventScan::new(ObjectSet::Base, since)).await?;
//! println!("events: {}", events.len());
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod event;
pub mod scan;
pub mod statement;

// Re-exports
pub use backend::QueryBackend;
pub use backend::local::LocalBackend;
pub use backend::memory::MemoryBackend;
pub use config::{QueryBackendType, QueryConfig, ResolvedQueryConfig};
pub use error::QueryError;
pub use event::{AccessEvent, AccessRecord, AccessedObject, ObjectSet, ParseObjectSetError};
pub use scan::EventScan;
pub use statement::{Param, Statement};

use std::sync::Arc;
use std::time::Duration;

/// Query engine that routes scans to the configured backend
///
/// Applies the configured timeout at the backend boundary; a scan that
/// outlives it fails with [`QueryError::Timeout`].
#[derive(Clone)]
pub struct QueryEngine {
    backend: Arc<dyn QueryBackend>,
    timeout: Option<Duration>,
}

impl QueryEngine {
    /// Create a new query engine with a specific backend
    pub fn new(backend: impl QueryBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            timeout: None,
        }
    }

    /// Set a per-scan timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create a query engine from resolved config
    pub fn from_resolved_config(config: &ResolvedQueryConfig) -> Result<Self, QueryError> {
        let engine = match config.backend {
            QueryBackendType::Local => Self::new(LocalBackend::new(&config.path)),
        };

        Ok(match config.timeout {
            Some(timeout) => engine.with_timeout(timeout),
            None => engine,
        })
    }

    /// Create a query engine from query config
    pub fn from_query_config(config: &QueryConfig) -> Result<Self, QueryError> {
        let resolved = ResolvedQueryConfig::from_config(config)?;
        Self::from_resolved_config(&resolved)
    }

    /// Get the backend name
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON
    Json,
    /// CSV format
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("unknown format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

// Implement QueryBackend for QueryEngine so it can be used with the analytics engine
#[async_trait::async_trait]
impl QueryBackend for QueryEngine {
    async fn scan(&self, scan: &EventScan) -> Result<Vec<AccessEvent>, QueryError> {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.backend.scan(scan))
                .await
                .map_err(|_| QueryError::Timeout(timeout))?,
            None => self.backend.scan(scan).await,
        }
    }

    async fn health_check(&self) -> Result<(), QueryError> {
        self.backend.health_check().await
    }

    fn name(&self) -> &'static str {
        self.backend.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    struct SlowBackend;

    #[async_trait]
    impl QueryBackend for SlowBackend {
        async fn scan(&self, _scan: &EventScan) -> Result<Vec<AccessEvent>, QueryError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }

        async fn health_check(&self) -> Result<(), QueryError> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    fn scan() -> EventScan {
        EventScan::new(ObjectSet::Base, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_is_reported() {
        let engine = QueryEngine::new(SlowBackend).with_timeout(Duration::from_secs(1));

        let err = engine.scan(&scan()).await.unwrap_err();
        assert!(matches!(err, QueryError::Timeout(d) if d == Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn test_engine_delegates_to_backend() {
        let engine = QueryEngine::new(MemoryBackend::new(Vec::new()));
        assert_eq!(engine.backend_name(), "memory");
        assert!(engine.scan(&scan()).await.unwrap().is_empty());
    }

    #[test]
    fn test_from_query_config() {
        let engine = QueryEngine::from_query_config(&QueryConfig::local("data")).unwrap();
        assert_eq!(engine.backend_name(), "local");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Table.to_string(), "table");
    }
}
