//! Configuration validation
//!
//! Validates config consistency:
//! - Window offsets point at or before the end of the bucket sequence
//! - Lookbacks stay within a century of the current bucket
//! - At least one environment is selectable, none blank
//! - The parser pattern compiles and captures namespace and environment
//! - SQL names are plain dotted identifiers

use regex::Regex;

use crate::Config;
use crate::error::{ConfigError, Result};
use crate::periods::PeriodRule;

/// Longest accepted lookbacks, one hundred years per period class
const MAX_HOURLY_LOOKBACK: u32 = 100 * 365 * 24;
const MAX_DAILY_LOOKBACK: u32 = 100 * 365;
const MAX_MONTHLY_LOOKBACK: u32 = 100 * 12;

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_periods(config)?;
    validate_filters(config)?;
    validate_parser(config)?;
    validate_sql(config)?;
    Ok(())
}

fn validate_periods(config: &Config) -> Result<()> {
    let periods = &config.periods;
    for (name, rule, max_lookback) in [
        ("periods.hourly", &periods.hourly, MAX_HOURLY_LOOKBACK),
        ("periods.daily", &periods.daily, MAX_DAILY_LOOKBACK),
        ("periods.monthly", &periods.monthly, MAX_MONTHLY_LOOKBACK),
    ] {
        validate_rule(name, rule, max_lookback)?;
    }
    Ok(())
}

fn validate_rule(section: &str, rule: &PeriodRule, max_lookback: u32) -> Result<()> {
    if rule.lookback > max_lookback {
        return Err(ConfigError::invalid_value(
            section,
            "lookback",
            format!("must be <= {}, got {}", max_lookback, rule.lookback),
        ));
    }
    if rule.window_offset > 0 {
        return Err(ConfigError::invalid_value(
            section,
            "window_offset",
            format!("must be <= 0, got {}", rule.window_offset),
        ));
    }
    Ok(())
}

fn validate_filters(config: &Config) -> Result<()> {
    let filters = &config.filters;
    if filters.environments.is_empty() {
        return Err(ConfigError::NoEnvironments);
    }
    if filters.environments.iter().any(|e| e.trim().is_empty()) {
        return Err(ConfigError::invalid_value(
            "filters",
            "environments",
            "environment names must not be blank",
        ));
    }
    Ok(())
}

fn validate_parser(config: &Config) -> Result<()> {
    let parser = &config.parser;
    let re = Regex::new(&parser.pattern)
        .map_err(|e| ConfigError::invalid_value("parser", "pattern", e.to_string()))?;

    for group in ["namespace", "environment"] {
        if !re.capture_names().flatten().any(|name| name == group) {
            return Err(ConfigError::invalid_value(
                "parser",
                "pattern",
                format!("missing named group '{}'", group),
            ));
        }
    }

    if parser.sentinel.is_empty() {
        return Err(ConfigError::invalid_value(
            "parser",
            "sentinel",
            "must not be empty",
        ));
    }
    Ok(())
}

fn validate_sql(config: &Config) -> Result<()> {
    let sql = &config.sql;
    for (field, value) in [
        ("access_history", &sql.access_history),
        ("environment_fn", &sql.environment_fn),
        ("namespace_fn", &sql.namespace_fn),
    ] {
        if !is_dotted_identifier(value) {
            return Err(ConfigError::invalid_value(
                "sql",
                field,
                format!("'{}' is not a dotted identifier", value),
            ));
        }
    }
    Ok(())
}

/// `db.schema.name` style: non-empty parts of alphanumerics and underscores
fn is_dotted_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.split('.').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
