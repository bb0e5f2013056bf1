//! Configuration file discovery and loading.
//!
//! Builds the [`ConfigLayerStack`] in priority order (later overrides
//! earlier):
//! 1. Built-in records
//! 2. Project config (`.apiconf/config.yml`), or an explicit `--config` file
//! 3. Local overrides (`.apiconf/config.local.yml`)
//! 4. `APICONF_<NAME>_API_BASE_URL` environment variables

use crate::config::layers::{ConfigLayer, ConfigLayerStack};
use crate::config::schema::ConfigFile;
use crate::error::{ApiConfError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".apiconf";

/// Paths to configuration files in priority order (later overrides earlier).
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project config: .apiconf/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .apiconf/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    /// Use a single explicit config file, skipping discovery.
    pub fn explicit(path: &Path) -> Self {
        Self {
            project: Some(path.to_path_buf()),
            project_local: None,
        }
    }

    /// Returns all config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiConfError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ApiConfError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`ConfigFile`].
///
/// An empty document is an empty config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ConfigFile> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(content).map_err(|e| ApiConfError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load every configuration layer for a project, reading the process
/// environment for overrides.
///
/// `explicit` replaces file discovery with a single file that must exist.
pub fn load_layers(project_root: &Path, explicit: Option<&Path>) -> Result<ConfigLayerStack> {
    load_layers_with_env(project_root, explicit, |key| std::env::var(key))
}

/// Load every configuration layer with a custom env var lookup (for testing).
pub fn load_layers_with_env<F>(
    project_root: &Path,
    explicit: Option<&Path>,
    env_fn: F,
) -> Result<ConfigLayerStack>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    let paths = match explicit {
        Some(path) => ConfigPaths::explicit(path),
        None => ConfigPaths::discover(project_root),
    };

    let mut stack = ConfigLayerStack::new();
    stack.push(ConfigLayer::builtin());

    for path in paths.all_existing() {
        tracing::debug!("Loading config from {}", path.display());
        let file = load_config_file(path)?;
        let mut layer = ConfigLayer::new(path.display().to_string());
        for (name, record) in file.environments {
            layer.set(name, record);
        }
        stack.push(layer);
    }

    let table = stack.resolve();
    let env_layer = ConfigLayer::from_env_with(table.names(), env_fn)?;
    if !env_layer.is_empty() {
        stack.push(env_layer);
    }

    Ok(stack)
}
