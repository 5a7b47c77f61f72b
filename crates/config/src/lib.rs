//! Egress Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! An empty file is a valid configuration: every section falls back to the
//! defaults the access-history dashboard has always used.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use egress_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[filters]\nenvironments = [\"PRD\"]").unwrap();
//! assert_eq!(config.filters.environments, vec!["PRD".to_string()]);
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [periods.hourly]
//! lookback = 72
//! window_offset = -25
//!
//! [filters]
//! environments = ["PRD", "TST", "DEV"]
//! exclude_users = ["SYSTEM"]
//! exclude_domain = "Stage"
//!
//! [parser]
//! pattern = '^(?P<namespace>[^_.]+)_(?P<environment>[^_.]+)_'
//! sentinel = "UNKNOWN"
//! ```
//!
//! The `[query]` section is owned by `egress-query` and ignored here.

mod error;
mod filters;
mod logging;
mod parser;
mod periods;
mod sql;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use filters::FiltersConfig;
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use parser::{DEFAULT_PATTERN, DEFAULT_SENTINEL, ParserConfig};
pub use periods::{PeriodRule, PeriodsConfig};
pub use sql::SqlConfig;

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Lookback horizon and default window per period class
    pub periods: PeriodsConfig,

    /// Environment allow-list and event exclusions
    pub filters: FiltersConfig,

    /// Object name parsing (environment, namespace, table name)
    pub parser: ParserConfig,

    /// Names used when rendering warehouse SQL
    pub sql: SqlConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML, or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    fn parse(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    /// Whether `environment` is one of the selectable environments
    pub fn is_allowed_environment(&self, environment: &str) -> bool {
        self.filters.allows(environment)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.periods.hourly.lookback, 72);
        assert_eq!(config.periods.daily.window_offset, -15);
        assert_eq!(config.filters.environments, vec!["PRD", "TST", "DEV"]);
        assert_eq!(config.filters.exclude_domain, "Stage");
        assert_eq!(config.parser.sentinel, "UNKNOWN");
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
[log]
level = "debug"
format = "json"

[periods.hourly]
lookback = 48
window_offset = -12

[periods.monthly]
lookback = 24

[filters]
environments = ["PRD", "QA"]
exclude_users = ["SYSTEM", "ETL_SVC"]
exclude_domain = "Stage"

[parser]
pattern = '^(?P<environment>[A-Z]+)-(?P<namespace>[A-Z]+)\.'
sentinel = "OTHER"

[sql]
access_history = "snowflake.account_usage.access_history"
environment_fn = "meta.public.env_of"
namespace_fn = "meta.public.ns_of"

[query]
backend = "local"
path = "data/"
"#;
        let config = Config::from_str(toml).unwrap();

        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.periods.hourly.lookback, 48);
        assert_eq!(config.periods.hourly.window_offset, -12);
        // Partially specified sections keep defaults for the rest
        assert_eq!(config.periods.monthly.lookback, 24);
        assert_eq!(config.periods.monthly.window_offset, -3);
        assert_eq!(config.filters.exclude_users, vec!["SYSTEM", "ETL_SVC"]);
        assert_eq!(config.parser.sentinel, "OTHER");
        assert_eq!(config.sql.namespace_fn, "meta.public.ns_of");
        assert!(config.is_allowed_environment("QA"));
        assert!(!config.is_allowed_environment("DEV"));
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_str("invalid { toml");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[filters]\nexclude_users = [\"ROBOT\"]").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.filters.exclude_users, vec!["ROBOT"]);
    }

    #[test]
    fn test_from_missing_file() {
        let err = Config::from_file("/nonexistent/egress.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/egress.toml"));
    }
}
