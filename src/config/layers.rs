//! Configuration layering.
//!
//! This module provides priority-based merging of configuration records
//! with source tracking, so `apiconf list` can say where each URL came from.

use std::collections::BTreeMap;

use super::schema::{ConfigurationRecord, EnvironmentTable};
use crate::error::{ApiConfError, Result};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "APICONF_";

/// Suffix for environment variable overrides.
pub const ENV_SUFFIX: &str = "_API_BASE_URL";

/// Name of the environment variable that overrides an environment's base URL.
///
/// The name is uppercased and `-` becomes `_`, so `pre-prod` and `pre_prod`
/// share one variable and a set value overrides both.
///
/// # Example
///
/// ```
/// use apiconf::config::override_var;
///
/// assert_eq!(override_var("production"), "APICONF_PRODUCTION_API_BASE_URL");
/// assert_eq!(override_var("pre-prod"), "APICONF_PRE_PROD_API_BASE_URL");
/// ```
pub fn override_var(environment: &str) -> String {
    format!(
        "{}{}{}",
        ENV_PREFIX,
        environment.to_uppercase().replace('-', "_"),
        ENV_SUFFIX
    )
}

/// Look up an environment variable.
///
/// Returns `Ok(None)` when the variable is unset. A set but non-UTF-8 value
/// is an error rather than being treated as unset.
pub fn read_env_var<F>(env_fn: F, var: &str) -> Result<Option<String>>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    match env_fn(var) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ApiConfError::EnvVarNotUnicode {
            var: var.to_string(),
        }),
    }
}

/// A layer of configuration records from one source.
///
/// # Example
///
/// ```
/// use apiconf::config::{ConfigLayer, ConfigurationRecord};
///
/// let mut layer = ConfigLayer::new("config.yml");
/// layer.set("production", ConfigurationRecord::new("https://api.example.com"));
///
/// assert!(layer.contains("production"));
/// assert_eq!(layer.source, "config.yml");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLayer {
    /// Records in this layer.
    pub records: BTreeMap<String, ConfigurationRecord>,
    /// Source of this layer (for display).
    pub source: String,
}

impl ConfigLayer {
    /// Create a new layer with the given source name.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            records: BTreeMap::new(),
            source: source.into(),
        }
    }

    /// Layer holding the built-in records.
    pub fn builtin() -> Self {
        let mut layer = Self::new("builtin");
        for (name, record) in EnvironmentTable::builtin().iter() {
            layer.set(name, record.clone());
        }
        layer
    }

    /// Build a layer from `APICONF_<NAME>_API_BASE_URL` variables.
    ///
    /// Only the given environment names are looked up. Values are trimmed
    /// of surrounding whitespace and blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns `EnvVarNotUnicode` if an override is set to non-UTF-8 data.
    pub fn from_env_with<'a, I, F>(names: I, env_fn: F) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let mut layer = Self::new("environment");
        for name in names {
            let var = override_var(name);
            match read_env_var(&env_fn, &var)? {
                Some(value) if !value.trim().is_empty() => {
                    tracing::debug!("{} overrides '{}'", var, name);
                    layer.set(name, ConfigurationRecord::new(value.trim()));
                }
                _ => {}
            }
        }
        Ok(layer)
    }

    /// Add a record to this layer.
    pub fn set(&mut self, name: impl Into<String>, record: ConfigurationRecord) {
        self.records.insert(name.into(), record);
    }

    /// Check if this layer has a record for an environment.
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Get the number of records in this layer.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if this layer is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Manages layered configuration records.
///
/// Records from higher layers override records from lower layers.
/// The first layer pushed has lowest priority, the last has highest.
///
/// # Example
///
/// ```
/// use apiconf::config::{ConfigLayer, ConfigLayerStack, ConfigurationRecord};
///
/// let mut stack = ConfigLayerStack::new();
/// stack.push(ConfigLayer::builtin());
///
/// let mut overlay = ConfigLayer::new("deploy");
/// overlay.set("production", ConfigurationRecord::new("https://api.example.com"));
/// stack.push(overlay);
///
/// assert_eq!(stack.get("production").unwrap().api_base_url, "https://api.example.com");
/// assert_eq!(stack.get("development").unwrap().api_base_url, "http://localhost:5000");
/// assert_eq!(stack.source_of("production"), Some("deploy"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLayerStack {
    /// Layers from lowest to highest priority.
    layers: Vec<ConfigLayer>,
}

impl ConfigLayerStack {
    /// Create a new empty stack.
    pub fn new() -> Self {
        Self { layers: vec![] }
    }

    /// Add a layer. Later layers have higher priority.
    pub fn push(&mut self, layer: ConfigLayer) {
        self.layers.push(layer);
    }

    /// Get the resolved record for an environment.
    pub fn get(&self, name: &str) -> Option<&ConfigurationRecord> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.records.get(name))
    }

    /// Get the source of an environment's record.
    pub fn source_of(&self, name: &str) -> Option<&str> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.contains(name))
            .map(|layer| layer.source.as_str())
    }

    /// Merge all layers into a single table.
    pub fn resolve(&self) -> EnvironmentTable {
        let mut table = EnvironmentTable::new();
        for layer in &self.layers {
            for (name, record) in &layer.records {
                table.insert(name.clone(), record.clone());
            }
        }
        table
    }

    /// Get all layers for inspection.
    pub fn layers(&self) -> &[ConfigLayer] {
        &self.layers
    }

    /// Get the number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
