//! Query configuration types

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default directory for exported access history
pub const DEFAULT_DATA_PATH: &str = "data";

/// Query configuration (`[query]` section)
///
/// ```toml
/// [query]
/// backend = "local"
/// path = "data/"
/// timeout_secs = 30
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Backend type (local) - inferred from `path` when unset
    pub backend: Option<String>,

    /// Path to exported access history files
    pub path: Option<PathBuf>,

    /// Per-query timeout in seconds (no timeout when unset)
    pub timeout_secs: Option<u64>,
}

impl QueryConfig {
    /// Create config for the local file backend
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Some("local".to_string()),
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Set the per-query timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Query backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryBackendType {
    /// Exported files on local disk
    Local,
}

/// Resolved query configuration
#[derive(Debug, Clone)]
pub struct ResolvedQueryConfig {
    /// Backend type
    pub backend: QueryBackendType,

    /// Path to exported files (for local backend)
    pub path: PathBuf,

    /// Per-query timeout
    pub timeout: Option<Duration>,
}

impl ResolvedQueryConfig {
    /// Resolve a `QueryConfig`, filling defaults
    pub fn from_config(config: &QueryConfig) -> Result<Self, crate::QueryError> {
        let backend = match config.backend.as_deref() {
            Some("local") | None => QueryBackendType::Local,
            Some(other) => {
                return Err(crate::QueryError::Config(format!(
                    "unknown backend: {} (supported: local)",
                    other
                )));
            }
        };

        let timeout = match config.timeout_secs {
            Some(0) => {
                return Err(crate::QueryError::Config(
                    "timeout_secs must be greater than 0".to_string(),
                ));
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        Ok(Self {
            backend,
            path: config
                .path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            timeout,
        })
    }
}

impl Default for ResolvedQueryConfig {
    fn default() -> Self {
        Self {
            backend: QueryBackendType::Local,
            path: PathBuf::from(DEFAULT_DATA_PATH),
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let resolved = ResolvedQueryConfig::from_config(&QueryConfig::default()).unwrap();
        assert_eq!(resolved.backend, QueryBackendType::Local);
        assert_eq!(resolved.path, PathBuf::from("data"));
        assert!(resolved.timeout.is_none());
    }

    #[test]
    fn test_resolve_local_with_timeout() {
        let config = QueryConfig::local("/var/lib/egress").with_timeout_secs(30);
        let resolved = ResolvedQueryConfig::from_config(&config).unwrap();
        assert_eq!(resolved.path, PathBuf::from("/var/lib/egress"));
        assert_eq!(resolved.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_resolve_unknown_backend() {
        let config = QueryConfig {
            backend: Some("oracle".into()),
            ..Default::default()
        };
        let err = ResolvedQueryConfig::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("oracle"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = QueryConfig::local("data").with_timeout_secs(0);
        assert!(ResolvedQueryConfig::from_config(&config).is_err());
    }

    #[test]
    fn test_deserialize_section() {
        let config: QueryConfig =
            toml::from_str("backend = \"local\"\npath = \"exports/\"\ntimeout_secs = 5").unwrap();
        assert_eq!(config.path, Some(PathBuf::from("exports/")));
        assert_eq!(config.timeout_secs, Some(5));
    }
}
