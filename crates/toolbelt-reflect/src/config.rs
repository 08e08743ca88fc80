//! Resolver configuration.

use serde::{Deserialize, Serialize};

/// Settings of a [`PropertyResolver`](crate::PropertyResolver).
///
/// Every field has a default, so partial documents deserialize:
///
/// ```
/// use toolbelt_reflect::ResolverConfig;
///
/// let config: ResolverConfig = serde_json::from_str(r#"{"separator": "/"}"#).unwrap();
/// assert_eq!(config.separator, "/");
/// assert_eq!(config.accessor_prefixes, ["get", "has", "is"]);
/// assert!(!config.force);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Separator between the segments of a property chain.
    pub separator: String,
    /// Accessor method prefixes, tried in order. The method name is
    /// `<prefix>_<property>`.
    pub accessor_prefixes: Vec<String>,
    /// Whether accessors are tried for properties the object does not
    /// declare. Applies to [`PropertyResolver::get`](crate::PropertyResolver::get)
    /// and [`PropertyResolver::get_many`](crate::PropertyResolver::get_many).
    pub force: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            separator: ".".to_string(),
            accessor_prefixes: vec!["get".to_string(), "has".to_string(), "is".to_string()],
            force: false,
        }
    }
}
