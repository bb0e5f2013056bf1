//! Environment table loading and layering.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Priority layering with source tracking in [`layers`]
//!
//! # Example
//!
//! ```
//! use apiconf::config::load_layers;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".apiconf");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(
//!     dir.join("config.yml"),
//!     "environments:\n  production:\n    api_base_url: https://api.example.com\n",
//! )
//! .unwrap();
//!
//! let stack = load_layers(temp.path(), None).unwrap();
//! let table = stack.resolve();
//! assert!(table.contains("development"));
//! ```
//!
//! # Configuration Sources
//!
//! Records are merged in this order (later wins):
//! 1. Built-in `development` and `production` records
//! 2. Project config (`.apiconf/config.yml`)
//! 3. Local overrides (`.apiconf/config.local.yml`)
//! 4. `APICONF_<NAME>_API_BASE_URL` environment variables

pub mod layers;
pub mod loader;
pub mod schema;

pub use layers::{override_var, read_env_var, ConfigLayer, ConfigLayerStack};
pub use loader::{
    load_config_file, load_layers, load_layers_with_env, parse_config, ConfigPaths, CONFIG_DIR,
};
pub use schema::{
    ConfigFile, ConfigurationRecord, EnvironmentTable, DEVELOPMENT, DEVELOPMENT_API_BASE_URL,
    PRODUCTION, PRODUCTION_API_BASE_URL,
};
