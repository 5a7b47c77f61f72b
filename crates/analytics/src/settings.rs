//! Pipeline settings
//!
//! One immutable value built from the loaded configuration and shared by
//! every panel. Nothing here changes after construction.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use egress_config::{Config, FiltersConfig, PeriodRule, PeriodsConfig, SqlConfig};

use crate::error::{AnalyticsError, Result};
use crate::filter::Filter;
use crate::parser::{CategoryParser, PatternParser};
use crate::period::PeriodClass;

/// Settings for the access pipeline
#[derive(Clone)]
pub struct Settings {
    /// Lookback and default window per period class
    pub periods: PeriodsConfig,
    /// Environment allow-list and exclusions
    pub filters: FiltersConfig,
    /// Names used when rendering warehouse SQL
    pub sql: SqlConfig,
    parser: Arc<dyn CategoryParser>,
}

impl Settings {
    /// Build settings from a loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let parser = PatternParser::from_config(&config.parser)?;

        Ok(Self {
            periods: config.periods,
            filters: config.filters.clone(),
            sql: config.sql.clone(),
            parser: Arc::new(parser),
        })
    }

    /// Replace the category parser
    pub fn with_parser(mut self, parser: Arc<dyn CategoryParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Category parser shared by all panels
    pub fn parser(&self) -> &dyn CategoryParser {
        self.parser.as_ref()
    }

    /// Lookback rule for a period class
    pub fn rule(&self, period: PeriodClass) -> &PeriodRule {
        period.rule(&self.periods)
    }

    /// Reject environments outside the allow-list
    pub fn check_environment(&self, environment: &str) -> Result<()> {
        if self.filters.allows(environment) {
            Ok(())
        } else {
            Err(AnalyticsError::InvalidEnvironment(environment.to_string()))
        }
    }

    /// Base filter for an environment with the configured exclusions applied
    pub fn filter(&self, since: DateTime<Utc>, environment: &str) -> Filter {
        let filter = Filter::new(since, environment)
            .with_excluded_actors(self.filters.exclude_users.iter().cloned());

        if self.filters.exclude_domain.is_empty() {
            filter
        } else {
            filter.with_excluded_domain(self.filters.exclude_domain.clone())
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("periods", &self.periods)
            .field("filters", &self.filters)
            .field("sql", &self.sql)
            .field("sentinel", &self.parser.sentinel())
            .finish()
    }
}
