//! Category parsers
//!
//! Object names encode where an object lives. Parsers pull the environment
//! and namespace out of a name and recover the bare table name within a
//! namespace. Parsers are total: a name that does not fit the pattern maps to
//! the sentinel instead of failing, so one odd object never sinks a chart.

use egress_config::ParserConfig;
use regex::Regex;

use crate::error::{AnalyticsError, Result};

/// Derives categories from object names
pub trait CategoryParser: Send + Sync {
    /// Environment of an object name, or the sentinel
    fn environment_of(&self, object_name: &str) -> String;

    /// Namespace of an object name, or the sentinel
    fn namespace_of(&self, object_name: &str) -> String;

    /// Table name with the `{namespace}_{environment}_` prefix removed
    fn strip_prefix(&self, object_name: &str, namespace: &str, environment: &str) -> String;

    /// Value returned for names that do not parse
    fn sentinel(&self) -> &str;
}

/// Regex-driven parser
///
/// The pattern's `namespace` and `environment` groups are read from the object
/// name; anything unmatched is the sentinel.
#[derive(Debug, Clone)]
pub struct PatternParser {
    pattern: Regex,
    sentinel: String,
}

impl PatternParser {
    /// Build a parser from a pattern and sentinel
    pub fn new(pattern: &str, sentinel: impl Into<String>) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| AnalyticsError::InvalidPattern(e.to_string()))?;

        for group in ["namespace", "environment"] {
            if !pattern.capture_names().flatten().any(|name| name == group) {
                return Err(AnalyticsError::InvalidPattern(format!(
                    "missing named group '{}'",
                    group
                )));
            }
        }

        Ok(Self {
            pattern,
            sentinel: sentinel.into(),
        })
    }

    /// Build a parser from the `[parser]` config section
    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        Self::new(&config.pattern, config.sentinel.clone())
    }

    fn group(&self, object_name: &str, group: &str) -> String {
        self.pattern
            .captures(object_name)
            .and_then(|caps| caps.name(group))
            .map(|m| m.as_str().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.sentinel.clone())
    }
}

impl CategoryParser for PatternParser {
    fn environment_of(&self, object_name: &str) -> String {
        self.group(object_name, "environment")
    }

    fn namespace_of(&self, object_name: &str) -> String {
        self.group(object_name, "namespace")
    }

    fn strip_prefix(&self, object_name: &str, namespace: &str, environment: &str) -> String {
        let prefix = format!("{}_{}_", namespace, environment);
        object_name.replace(&prefix, "")
    }

    fn sentinel(&self) -> &str {
        &self.sentinel
    }
}
