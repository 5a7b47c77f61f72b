//! Event filter configuration

use serde::Deserialize;

/// Environment allow-list and exclusions applied to every aggregation
///
/// # Example
///
/// ```toml
/// [filters]
/// environments = ["PRD", "TST", "DEV"]
/// exclude_users = ["SYSTEM"]
/// exclude_domain = "Stage"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Environments a caller may select
    pub environments: Vec<String>,

    /// Actors whose accesses are never counted
    pub exclude_users: Vec<String>,

    /// Object domain that is never counted (transient staging objects)
    pub exclude_domain: String,
}

impl FiltersConfig {
    /// Whether `environment` is one of the selectable environments
    pub fn allows(&self, environment: &str) -> bool {
        self.environments.iter().any(|e| e == environment)
    }
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            environments: vec!["PRD".into(), "TST".into(), "DEV".into()],
            exclude_users: vec!["SYSTEM".into()],
            exclude_domain: "Stage".into(),
        }
    }
}
