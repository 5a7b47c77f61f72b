//! Object name parser configuration

use serde::Deserialize;

/// Default object name pattern: `{namespace}_{environment}_...`
pub const DEFAULT_PATTERN: &str = r"^(?P<namespace>[^_.]+)_(?P<environment>[^_.]+)_";

/// Category used for object names the pattern does not match
pub const DEFAULT_SENTINEL: &str = "UNKNOWN";

/// How environment and namespace are derived from an object name
///
/// The pattern must contain the named groups `namespace` and `environment`.
///
/// # Example
///
/// ```toml
/// [parser]
/// pattern = '^(?P<namespace>[^_.]+)_(?P<environment>[^_.]+)_'
/// sentinel = "UNKNOWN"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Regular expression with `namespace` and `environment` groups
    pub pattern: String,

    /// Value returned when the pattern does not match
    pub sentinel: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}
