//! Configuration schema types.
//!
//! Defines the per-environment [`ConfigurationRecord`], the
//! [`EnvironmentTable`] keyed by environment name, and the on-disk
//! [`ConfigFile`] format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the environment used for local hosts.
pub const DEVELOPMENT: &str = "development";

/// Name of the environment used for every other host.
pub const PRODUCTION: &str = "production";

/// Built-in API base URL for local development.
pub const DEVELOPMENT_API_BASE_URL: &str = "http://localhost:5000";

/// Built-in API base URL for the deployed application.
pub const PRODUCTION_API_BASE_URL: &str = "https://kaam-asaasan-api.herokuapp.com";

/// Settings bundle for one environment.
///
/// Serialized as `{"apiBaseUrl": "..."}`. The snake_case spelling is
/// accepted when reading config files.
///
/// # Example
///
/// ```
/// use apiconf::config::ConfigurationRecord;
///
/// let record = ConfigurationRecord::new("http://localhost:5000");
/// let json = serde_json::to_string(&record).unwrap();
/// assert_eq!(json, r#"{"apiBaseUrl":"http://localhost:5000"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationRecord {
    /// Base URL that request paths are appended to. Not validated.
    #[serde(alias = "api_base_url")]
    pub api_base_url: String,
}

impl ConfigurationRecord {
    /// Create a record with the given base URL.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
        }
    }
}

/// Configuration records keyed by environment name.
///
/// Iteration order is alphabetical, which keeps `list` output stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentTable {
    records: BTreeMap<String, ConfigurationRecord>,
}

impl EnvironmentTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table: `development` and `production`.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert(DEVELOPMENT, ConfigurationRecord::new(DEVELOPMENT_API_BASE_URL));
        table.insert(PRODUCTION, ConfigurationRecord::new(PRODUCTION_API_BASE_URL));
        table
    }

    /// Insert or replace the record for an environment.
    pub fn insert(&mut self, name: impl Into<String>, record: ConfigurationRecord) {
        self.records.insert(name.into(), record);
    }

    /// Look up the record for an environment.
    pub fn get(&self, name: &str) -> Option<&ConfigurationRecord> {
        self.records.get(name)
    }

    /// Check whether an environment is present.
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Environment names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Iterate over `(name, record)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigurationRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of environments.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Contents of a `.apiconf/config.yml` file.
///
/// ```yaml
/// environments:
///   production:
///     api_base_url: https://api.example.com
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Records to add or override, keyed by environment name.
    #[serde(default)]
    pub environments: BTreeMap<String, ConfigurationRecord>,
}
