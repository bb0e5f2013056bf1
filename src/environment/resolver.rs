//! Environment resolution.
//!
//! Resolves the active environment using the priority chain:
//! 1. Explicit `--env` flag
//! 2. Hostname classification
//!
//! and turns it into an [`ApiConfig`] by looking the environment up in the
//! layered configuration table.

use super::detection::{Classification, HostnameReading, HostnameSource};
use crate::config::layers::ConfigLayerStack;
use crate::error::{ApiConfError, Result};
use crate::published::{ApiConfig, PublishedConfig};

/// How the environment was determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentSource {
    /// Explicitly set via `--env` flag.
    Flag,
    /// Classified from a hostname.
    Hostname(HostnameReading),
}

impl std::fmt::Display for EnvironmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "--env flag"),
            Self::Hostname(reading) => {
                write!(f, "hostname '{}' via {}", reading.hostname, reading.read_via)
            }
        }
    }
}

/// A resolved environment with its name and how it was determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    /// The environment name (e.g., "development", "production").
    pub name: String,
    /// How this environment was determined.
    pub source: EnvironmentSource,
}

impl ResolvedEnvironment {
    /// Resolve the environment using the priority chain.
    ///
    /// The hostname source is only consulted when no flag is given.
    ///
    /// # Example
    ///
    /// ```
    /// use apiconf::environment::{EnvironmentSource, FixedHostname, ResolvedEnvironment};
    ///
    /// let host = FixedHostname("kaam-asaasan.app".to_string());
    /// let resolved = ResolvedEnvironment::resolve(None, &host).unwrap();
    /// assert_eq!(resolved.name, "production");
    ///
    /// let resolved = ResolvedEnvironment::resolve(Some("development"), &host).unwrap();
    /// assert_eq!(resolved.source, EnvironmentSource::Flag);
    /// ```
    pub fn resolve(flag: Option<&str>, hostname: &dyn HostnameSource) -> Result<Self> {
        if let Some(name) = flag {
            return Ok(Self {
                name: name.to_string(),
                source: EnvironmentSource::Flag,
            });
        }

        Ok(Self::from_hostname(hostname.read_hostname()?))
    }

    /// Classify an already-read hostname.
    pub fn from_hostname(reading: HostnameReading) -> Self {
        let classification = Classification::from_hostname(&reading.hostname);
        Self {
            name: classification.environment().to_string(),
            source: EnvironmentSource::Hostname(reading),
        }
    }
}

/// Picks the API configuration for the current execution context.
///
/// # Example
///
/// ```
/// use apiconf::config::{ConfigLayer, ConfigLayerStack};
/// use apiconf::environment::{EnvironmentResolver, FixedHostname};
///
/// let mut stack = ConfigLayerStack::new();
/// stack.push(ConfigLayer::builtin());
///
/// let resolver = EnvironmentResolver::new(stack);
/// let config = resolver
///     .resolve(None, &FixedHostname("localhost".to_string()))
///     .unwrap();
/// assert_eq!(config.api_base_url(), "http://localhost:5000");
/// ```
#[derive(Debug, Clone)]
pub struct EnvironmentResolver {
    layers: ConfigLayerStack,
}

impl EnvironmentResolver {
    /// Create a resolver over the given configuration layers.
    pub fn new(layers: ConfigLayerStack) -> Self {
        Self { layers }
    }

    /// Resolve the environment and select its record.
    ///
    /// # Errors
    ///
    /// Returns `HostnameUnavailable` if no flag is given and the hostname
    /// cannot be read, and `UnknownEnvironment` if the selected environment
    /// has no record.
    pub fn resolve(&self, flag: Option<&str>, hostname: &dyn HostnameSource) -> Result<ApiConfig> {
        let environment = ResolvedEnvironment::resolve(flag, hostname)?;
        self.select(environment)
    }

    /// Select the record for an already-resolved environment.
    pub fn select(&self, environment: ResolvedEnvironment) -> Result<ApiConfig> {
        let record = self.layers.get(&environment.name).cloned().ok_or_else(|| {
            let table = self.layers.resolve();
            ApiConfError::UnknownEnvironment {
                name: environment.name.clone(),
                available: table.names().collect::<Vec<_>>().join(", "),
            }
        })?;
        let layer = self
            .layers
            .source_of(&environment.name)
            .unwrap_or("builtin")
            .to_string();

        tracing::info!(
            "Selected {} ({}) -> {}",
            environment.name,
            environment.source,
            record.api_base_url
        );

        Ok(ApiConfig::new(environment, record, layer))
    }

    /// Resolve and publish into the given cell.
    ///
    /// Re-running with the same outcome returns the already-published value.
    pub fn resolve_into<'a>(
        &self,
        cell: &'a PublishedConfig,
        flag: Option<&str>,
        hostname: &dyn HostnameSource,
    ) -> Result<&'a ApiConfig> {
        let config = self.resolve(flag, hostname)?;
        cell.publish(config)
    }
}
