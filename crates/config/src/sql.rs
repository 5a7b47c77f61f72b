//! Warehouse SQL naming
//!
//! Only used to render the grouped-count statement a warehouse executor would
//! run (`egress explain`). Filter values are always bound, never spliced in.

use serde::Deserialize;

/// Names of the access history view and the parsing functions in the warehouse
///
/// # Example
///
/// ```toml
/// [sql]
/// access_history = "snowflake.account_usage.access_history"
/// environment_fn = "demo_db.public.myenv"
/// namespace_fn = "demo_db.public.myns"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SqlConfig {
    /// Fully qualified access history view
    pub access_history: String,

    /// Function returning the environment of an object name
    pub environment_fn: String,

    /// Function returning the namespace of an object name
    pub namespace_fn: String,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            access_history: "snowflake.account_usage.access_history".into(),
            environment_fn: "demo_db.public.myenv".into(),
            namespace_fn: "demo_db.public.myns".into(),
        }
    }
}
