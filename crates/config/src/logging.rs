//! Logging configuration
//!
//! Diagnostics from the pipeline (backend scans, skipped export lines,
//! dropped object names) are written to stderr. Stdout is reserved for
//! chart JSON and tables, so the destination is not configurable; only
//! the verbosity and the encoding are.

use serde::Deserialize;

/// Log level
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every bucket and backend call
    Trace,
    /// Per-line parse failures and query timings
    Debug,
    /// Default
    #[default]
    Info,
    /// Skipped lines and degraded panels
    Warn,
    /// Failures only
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Encoding of stderr log lines
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines (default)
    #[default]
    Console,
    /// One JSON object per line, for log shippers reading stderr
    Json,
}

/// `[log]` section
///
/// ```toml
/// [log]
/// level = "warn"
/// format = "json"
/// ```
///
/// Unknown keys are rejected, including an `output` destination.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Verbosity, default info
    pub level: LogLevel,

    /// Encoding, default console
    pub format: LogFormat,
}

impl LogConfig {
    /// Filter directive to install, a `--log-level` override wins over `level`
    pub fn directive(&self, override_level: Option<&str>) -> String {
        match override_level.map(str::trim).filter(|l| !l.is_empty()) {
            Some(level) => level.to_string(),
            None => self.level.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_section_logs_info_as_console() {
        let config: LogConfig = toml::from_str("").unwrap();
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Console);
        assert_eq!(config.directive(None), "info");
    }

    #[test]
    fn test_json_for_log_shippers() {
        let config: LogConfig = toml::from_str("level = \"warn\"\nformat = \"json\"").unwrap();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.directive(None), "warn");
    }

    #[test]
    fn test_output_destination_is_not_configurable() {
        for toml in ["output = \"stdout\"", "output = \"/var/log/egress.log\""] {
            let err = toml::from_str::<LogConfig>(toml).unwrap_err();
            assert!(err.to_string().contains("output"));
        }
    }

    #[test]
    fn test_override_wins_over_level() {
        let config = LogConfig {
            level: LogLevel::Error,
            format: LogFormat::Console,
        };
        assert_eq!(config.directive(Some("egress=debug")), "egress=debug");
        assert_eq!(config.directive(Some("  ")), "error");
    }
}
