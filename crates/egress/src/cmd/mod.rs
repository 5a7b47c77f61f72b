//! Command implementations for the egress CLI
//!
//! Every command loads the same configuration: pipeline settings from the
//! whole file and the backend from its `[query]` section.

pub mod chart;
pub mod dashboard;
pub mod explain;
pub mod namespaces;
pub mod output;

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use egress_analytics::{AccessEngine, AnalyticsError, PeriodClass, Selection, Settings};
use egress_config::Config;
use egress_query::{ObjectSet, QueryConfig, QueryEngine, ResolvedQueryConfig};

/// Paths searched when `--config` is not given
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/egress.toml", "egress.toml"];

/// Selection arguments shared by all commands
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Period class (hourly, daily, monthly)
    #[arg(short, long, default_value = "daily")]
    pub period: String,

    /// Environment (defaults to the first configured environment)
    #[arg(short, long)]
    pub env: Option<String>,

    /// Pin "now" for reproducible output (RFC 3339)
    #[arg(long, value_name = "TIMESTAMP")]
    pub as_of: Option<String>,
}

impl SelectionArgs {
    /// Build a selection for an object set
    pub fn selection(&self, settings: &Settings, object_set: ObjectSet) -> Result<Selection> {
        let period = PeriodClass::parse(&self.period)?;

        let environment = match &self.env {
            Some(env) => env.clone(),
            None => settings
                .filters
                .environments
                .first()
                .cloned()
                .context("no environments configured")?,
        };

        let mut selection = Selection::new(period, environment).with_object_set(object_set);
        if let Some(as_of) = &self.as_of {
            selection = selection.with_as_of(parse_as_of(as_of)?);
        }

        Ok(selection)
    }
}

/// Parse an object set name (base, underlying, direct)
pub fn parse_object_set(s: &str) -> Result<ObjectSet> {
    Ok(ObjectSet::from_str(s).map_err(AnalyticsError::from)?)
}

/// Parse an RFC 3339 timestamp
fn parse_as_of(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .with_context(|| format!("invalid --as-of timestamp: {}", s))
}

/// Loaded configuration for one command run
pub struct Runtime {
    /// Pipeline settings
    pub settings: Arc<Settings>,
    /// Backend connection
    pub query: ResolvedQueryConfig,
}

impl Runtime {
    /// Load configuration from an explicit path or the default locations
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        match find_config(config_path)? {
            Some(path) => Self::from_path(&path),
            None => Self::from_parts(&Config::default(), ResolvedQueryConfig::default()),
        }
    }

    /// Load configuration from a file
    fn from_path(path: &Path) -> Result<Self> {
        let config = Config::from_file(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?;
        let query = load_query_config(path)?;
        Self::from_parts(&config, query)
    }

    fn from_parts(config: &Config, query: ResolvedQueryConfig) -> Result<Self> {
        let settings = Settings::from_config(config).context("invalid pipeline settings")?;
        Ok(Self {
            settings: Arc::new(settings),
            query,
        })
    }

    /// Build the access engine over the configured backend
    pub fn engine(&self) -> Result<AccessEngine> {
        let backend = QueryEngine::from_resolved_config(&self.query)
            .context("failed to create query engine")?;
        Ok(AccessEngine::new(Arc::new(backend), Arc::clone(&self.settings)))
    }
}

/// Resolve which config file to use, if any
fn find_config(config_path: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(Some(path.to_path_buf()));
        }
        return Err(anyhow::anyhow!("config file not found: {}", path.display()));
    }

    Ok(DEFAULT_CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists()))
}

/// Read the `[query]` section of a config file
fn load_query_config(path: &Path) -> Result<ResolvedQueryConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let toml_value: toml::Value = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    // Extract [query] section - if missing, use the local default
    let query_config: QueryConfig = match toml_value.get("query") {
        Some(section) => section
            .clone()
            .try_into()
            .context("failed to parse [query] section")?,
        None => return Ok(ResolvedQueryConfig::default()),
    };

    ResolvedQueryConfig::from_config(&query_config).context("invalid [query] section")
}
