//! apiconf - API base URL selection by hostname.
//!
//! A web client served from `localhost` or `127.0.0.1` talks to the local
//! API server; served from anywhere else it talks to the deployed API.
//! apiconf makes that decision once, at startup, and publishes it.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Environment table, config files, and overrides
//! - [`environment`] - Hostname reading, classification, and resolution
//! - [`error`] - Error types and result aliases
//! - [`published`] - The resolved configuration and the write-once `API_CONFIG`
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use apiconf::config::{ConfigLayer, ConfigLayerStack};
//! use apiconf::environment::{EnvironmentResolver, FixedHostname};
//! use apiconf::PublishedConfig;
//!
//! let mut layers = ConfigLayerStack::new();
//! layers.push(ConfigLayer::builtin());
//! let resolver = EnvironmentResolver::new(layers);
//!
//! let published = PublishedConfig::new();
//! let config = resolver
//!     .resolve_into(&published, None, &FixedHostname("kaam-asaasan.app".to_string()))
//!     .unwrap();
//! assert_eq!(config.api_base_url(), "https://kaam-asaasan-api.herokuapp.com");
//! assert_eq!(
//!     config.endpoint("/api/report-requests"),
//!     "https://kaam-asaasan-api.herokuapp.com/api/report-requests"
//! );
//! ```

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod published;
pub mod ui;

pub use error::{ApiConfError, Result};
pub use published::{api_config, publish_global, ApiConfig, PublishedConfig, API_CONFIG};

use std::path::Path;

use environment::{EnvironmentResolver, HostnameDetector};

/// Resolve the configuration for this process and publish it to
/// [`API_CONFIG`].
///
/// Reads config files under `project_root`, `APICONF_*` overrides, and the
/// hostname from `APICONF_HOSTNAME` or `APICONF_PAGE_URL`. Call this once at
/// startup and pass the returned value to the code that needs it.
///
/// # Errors
///
/// Returns `HostnameUnavailable` if the hostname cannot be read. There is no
/// fallback environment.
pub fn init(project_root: &Path) -> Result<&'static ApiConfig> {
    init_with_env(project_root, |key| std::env::var(key))
}

/// [`init`] with a custom env var lookup in place of the process
/// environment.
pub fn init_with_env<F>(project_root: &Path, env_fn: F) -> Result<&'static ApiConfig>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let layers = config::load_layers_with_env(project_root, None, &env_fn)?;
    let resolver = EnvironmentResolver::new(layers);
    let detector = HostnameDetector::new();
    let config = resolver.resolve(None, &detector.with_env(&env_fn))?;
    publish_global(config)
}
