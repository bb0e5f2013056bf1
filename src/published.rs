//! The resolved API configuration and its write-once publication.
//!
//! [`ApiConfig`] is the value callers should thread through their code.
//! [`API_CONFIG`] is the process-wide binding for code that cannot take it
//! as a parameter. It is set at most once; later publications of the same
//! selection are no-ops and different selections are rejected.

use std::sync::OnceLock;

use crate::config::schema::ConfigurationRecord;
use crate::environment::resolver::{EnvironmentSource, ResolvedEnvironment};
use crate::error::{ApiConfError, Result};

/// The process-wide published configuration.
pub static API_CONFIG: PublishedConfig = PublishedConfig::new();

/// The active configuration for this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    environment: ResolvedEnvironment,
    record: ConfigurationRecord,
    layer: String,
}

impl ApiConfig {
    /// Bundle a resolved environment with its record and the layer that
    /// supplied it.
    pub fn new(
        environment: ResolvedEnvironment,
        record: ConfigurationRecord,
        layer: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            record,
            layer: layer.into(),
        }
    }

    /// The environment name.
    pub fn environment(&self) -> &str {
        &self.environment.name
    }

    /// How the environment was chosen.
    pub fn source(&self) -> &EnvironmentSource {
        &self.environment.source
    }

    /// The selected record.
    pub fn record(&self) -> &ConfigurationRecord {
        &self.record
    }

    /// The configuration layer the record came from.
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// The API base URL.
    pub fn api_base_url(&self) -> &str {
        &self.record.api_base_url
    }

    /// Form a request URL by joining the base URL and a path with a single `/`.
    ///
    /// # Example
    ///
    /// ```
    /// use apiconf::config::ConfigurationRecord;
    /// use apiconf::environment::{FixedHostname, ResolvedEnvironment};
    /// use apiconf::ApiConfig;
    ///
    /// let env = ResolvedEnvironment::resolve(None, &FixedHostname("localhost".into())).unwrap();
    /// let config = ApiConfig::new(env, ConfigurationRecord::new("http://localhost:5000/"), "builtin");
    /// assert_eq!(
    ///     config.endpoint("/api/report-requests"),
    ///     "http://localhost:5000/api/report-requests"
    /// );
    /// ```
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.api_base_url().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return base.to_string();
        }
        format!("{}/{}", base, path)
    }

    /// Whether two configurations select the same environment and record.
    ///
    /// How the environment was chosen does not matter: `localhost` and
    /// `127.0.0.1` select the same configuration.
    pub fn same_selection(&self, other: &ApiConfig) -> bool {
        self.environment.name == other.environment.name && self.record == other.record
    }
}

/// A write-once cell holding the published [`ApiConfig`].
#[derive(Debug, Default)]
pub struct PublishedConfig {
    cell: OnceLock<ApiConfig>,
}

impl PublishedConfig {
    /// Create an empty cell.
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Publish a configuration.
    ///
    /// The first call stores the value. Later calls with the same selection
    /// return the stored value.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyPublished` if a different selection is already stored.
    /// The stored value is left unchanged.
    pub fn publish(&self, config: ApiConfig) -> Result<&ApiConfig> {
        let stored = self.cell.get_or_init(|| {
            tracing::debug!("Publishing API configuration for {}", config.environment());
            config.clone()
        });

        if stored.same_selection(&config) {
            Ok(stored)
        } else {
            Err(ApiConfError::AlreadyPublished {
                current: stored.environment().to_string(),
                attempted: config.environment().to_string(),
            })
        }
    }

    /// The published configuration, if any.
    pub fn get(&self) -> Option<&ApiConfig> {
        self.cell.get()
    }

    /// Check whether a configuration has been published.
    pub fn is_published(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Publish into the process-wide [`API_CONFIG`].
pub fn publish_global(config: ApiConfig) -> Result<&'static ApiConfig> {
    API_CONFIG.publish(config)
}

/// Read the process-wide [`API_CONFIG`].
pub fn api_config() -> Option<&'static ApiConfig> {
    API_CONFIG.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::detection::HostnameReading;

    fn config_for(hostname: &str, url: &str) -> ApiConfig {
        let environment = ResolvedEnvironment::from_hostname(HostnameReading::new(hostname, "test"));
        ApiConfig::new(environment, ConfigurationRecord::new(url), "builtin")
    }

    #[test]
    fn empty_cell_has_no_value() {
        let cell = PublishedConfig::new();
        assert!(cell.get().is_none());
        assert!(!cell.is_published());
    }

    #[test]
    fn first_publish_stores_value() {
        let cell = PublishedConfig::new();
        let stored = cell
            .publish(config_for("localhost", "http://localhost:5000"))
            .unwrap();
        assert_eq!(stored.api_base_url(), "http://localhost:5000");
        assert!(cell.is_published());
    }

    #[test]
    fn republishing_same_selection_is_idempotent() {
        let cell = PublishedConfig::new();
        cell.publish(config_for("localhost", "http://localhost:5000"))
            .unwrap();
        let again = cell
            .publish(config_for("127.0.0.1", "http://localhost:5000"))
            .unwrap();
        // The first value stays, including how it was chosen.
        assert_eq!(
            again.source(),
            &EnvironmentSource::Hostname(HostnameReading::new("localhost", "test"))
        );
    }

    #[test]
    fn publishing_different_selection_fails() {
        let cell = PublishedConfig::new();
        cell.publish(config_for("localhost", "http://localhost:5000"))
            .unwrap();

        let err = cell
            .publish(config_for(
                "example.com",
                "https://kaam-asaasan-api.herokuapp.com",
            ))
            .unwrap_err();
        match err {
            ApiConfError::AlreadyPublished { current, attempted } => {
                assert_eq!(current, "development");
                assert_eq!(attempted, "production");
            }
            other => panic!("expected AlreadyPublished, got {:?}", other),
        }
        assert_eq!(cell.get().unwrap().environment(), "development");
    }

    #[test]
    fn same_environment_with_other_url_is_rejected() {
        let cell = PublishedConfig::new();
        cell.publish(config_for("example.com", "https://a.example.com"))
            .unwrap();
        assert!(cell
            .publish(config_for("example.com", "https://b.example.com"))
            .is_err());
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let config = config_for("localhost", "http://localhost:5000");
        assert_eq!(
            config.endpoint("api/handwritten-requests"),
            "http://localhost:5000/api/handwritten-requests"
        );
        assert_eq!(
            config.endpoint("/api/handwritten-requests"),
            "http://localhost:5000/api/handwritten-requests"
        );

        let trailing = config_for("localhost", "http://localhost:5000/");
        assert_eq!(
            trailing.endpoint("/report/api/report-requests"),
            "http://localhost:5000/report/api/report-requests"
        );
    }

    #[test]
    fn endpoint_with_empty_path_is_base() {
        let config = config_for("localhost", "http://localhost:5000/");
        assert_eq!(config.endpoint(""), "http://localhost:5000");
    }

    #[test]
    fn global_is_write_once() {
        // Only this test touches the global cell.
        let stored = publish_global(config_for(
            "kaam-asaasan.app",
            "https://kaam-asaasan-api.herokuapp.com",
        ))
        .unwrap();
        assert_eq!(stored.environment(), "production");
        assert_eq!(
            api_config().unwrap().api_base_url(),
            "https://kaam-asaasan-api.herokuapp.com"
        );
        assert!(publish_global(config_for("localhost", "http://localhost:5000")).is_err());
    }
}
