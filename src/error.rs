//! Error types for apiconf operations.
//!
//! This module defines [`ApiConfError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Resolution never falls back to a default when the hostname cannot be read;
//!   it fails with [`ApiConfError::HostnameUnavailable`]
//! - A variable that is set but unreadable fails with
//!   [`ApiConfError::EnvVarNotUnicode`] instead of counting as unset
//! - Use `anyhow::Error` (via `ApiConfError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for apiconf operations.
#[derive(Debug, Error)]
pub enum ApiConfError {
    /// No hostname source produced a value.
    #[error("Cannot determine hostname (tried: {tried})")]
    HostnameUnavailable { tried: String },

    /// A page URL was supplied but could not be parsed.
    #[error("Invalid page URL '{url}': {message}")]
    InvalidPageUrl { url: String, message: String },

    /// The selected environment has no configuration record.
    #[error("Unknown environment '{name}' (available: {available})")]
    UnknownEnvironment { name: String, available: String },

    /// A different configuration was already published for this process.
    #[error("API configuration already published for '{current}', refusing to replace it with '{attempted}'")]
    AlreadyPublished { current: String, attempted: String },

    /// An environment variable is set but does not hold valid UTF-8.
    #[error("Environment variable {var} is not valid UTF-8")]
    EnvVarNotUnicode { var: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for apiconf operations.
pub type Result<T> = std::result::Result<T, ApiConfError>;
