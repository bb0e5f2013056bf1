//! Hostname reading and classification.
//!
//! The hostname stands in for a browser page's `location.hostname`. It is
//! read from, in order:
//!
//! 1. An explicit hostname (`--hostname`)
//! 2. An explicit page URL (`--page-url`)
//! 3. `APICONF_HOSTNAME`
//! 4. `APICONF_PAGE_URL`
//!
//! When none of these is available, reading fails. There is no default host.
//! A variable that is set but not valid UTF-8 also fails rather than
//! passing to the next source.

use crate::config::layers::read_env_var;
use crate::config::schema::{DEVELOPMENT, PRODUCTION};
use crate::error::{ApiConfError, Result};

/// Hostnames served by a local development server.
pub const LOCAL_HOSTNAMES: &[&str] = &["localhost", "127.0.0.1"];

/// Environment variable holding the hostname.
pub const HOSTNAME_VAR: &str = "APICONF_HOSTNAME";

/// Environment variable holding the full page URL.
pub const PAGE_URL_VAR: &str = "APICONF_PAGE_URL";

/// Whether a hostname belongs to local development or a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// `localhost` or `127.0.0.1`.
    Development,
    /// Any other hostname, including the empty string.
    Production,
}

impl Classification {
    /// Classify a hostname.
    ///
    /// Only exact matches against [`LOCAL_HOSTNAMES`] count as development.
    /// No trimming, case folding, or port stripping is applied.
    ///
    /// # Example
    ///
    /// ```
    /// use apiconf::environment::Classification;
    ///
    /// assert_eq!(Classification::from_hostname("localhost"), Classification::Development);
    /// assert_eq!(Classification::from_hostname("127.0.0.1"), Classification::Development);
    /// assert_eq!(Classification::from_hostname("example.com"), Classification::Production);
    /// assert_eq!(Classification::from_hostname(""), Classification::Production);
    /// ```
    pub fn from_hostname(hostname: &str) -> Self {
        if LOCAL_HOSTNAMES.contains(&hostname) {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// The environment table key for this classification.
    pub fn environment(&self) -> &'static str {
        match self {
            Self::Development => DEVELOPMENT,
            Self::Production => PRODUCTION,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.environment())
    }
}

/// A hostname together with where it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostnameReading {
    /// The hostname, possibly empty.
    pub hostname: String,
    /// The flag or variable that supplied it.
    pub read_via: String,
}

impl HostnameReading {
    /// Create a reading.
    pub fn new(hostname: impl Into<String>, read_via: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            read_via: read_via.into(),
        }
    }
}

/// Supplies the hostname of the current execution context.
///
/// Implement this to plug in a host-specific source such as a browser's
/// `location`.
pub trait HostnameSource {
    /// Read the hostname.
    ///
    /// # Errors
    ///
    /// Returns `HostnameUnavailable` when no hostname can be determined.
    fn read_hostname(&self) -> Result<HostnameReading>;
}

/// A hostname known up front.
#[derive(Debug, Clone)]
pub struct FixedHostname(pub String);

impl HostnameSource for FixedHostname {
    fn read_hostname(&self) -> Result<HostnameReading> {
        Ok(HostnameReading::new(self.0.clone(), "fixed"))
    }
}

/// Extract the hostname from a page URL, like `location.hostname`.
///
/// URLs without a host (such as `file:///index.html`) yield an empty
/// hostname. IPv6 hosts keep their brackets.
///
/// # Example
///
/// ```
/// use apiconf::environment::hostname_from_page_url;
///
/// assert_eq!(hostname_from_page_url("http://localhost:8080/app").unwrap(), "localhost");
/// assert_eq!(hostname_from_page_url("file:///index.html").unwrap(), "");
/// ```
pub fn hostname_from_page_url(page_url: &str) -> Result<String> {
    let parsed = url::Url::parse(page_url).map_err(|e| ApiConfError::InvalidPageUrl {
        url: page_url.to_string(),
        message: e.to_string(),
    })?;
    Ok(parsed.host_str().unwrap_or("").to_string())
}

/// Default hostname source chain.
///
/// # Example
///
/// ```
/// use apiconf::environment::HostnameDetector;
///
/// let detector = HostnameDetector::new().with_hostname(Some("localhost".to_string()));
/// let reading = detector.detect_with_env(|_| Err(std::env::VarError::NotPresent)).unwrap();
/// assert_eq!(reading.hostname, "localhost");
/// assert_eq!(reading.read_via, "--hostname");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HostnameDetector {
    hostname: Option<String>,
    page_url: Option<String>,
}

impl HostnameDetector {
    /// Create a detector that only consults the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the explicit hostname (highest priority).
    pub fn with_hostname(mut self, hostname: Option<String>) -> Self {
        self.hostname = hostname;
        self
    }

    /// Set the explicit page URL.
    pub fn with_page_url(mut self, page_url: Option<String>) -> Self {
        self.page_url = page_url;
        self
    }

    /// Detect with a custom env var lookup (for testing).
    pub fn detect_with_env<F>(&self, env_fn: F) -> Result<HostnameReading>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        if let Some(hostname) = &self.hostname {
            return Ok(HostnameReading::new(hostname.clone(), "--hostname"));
        }

        if let Some(page_url) = &self.page_url {
            return Ok(HostnameReading::new(
                hostname_from_page_url(page_url)?,
                "--page-url",
            ));
        }

        if let Some(hostname) = read_env_var(&env_fn, HOSTNAME_VAR)? {
            return Ok(HostnameReading::new(hostname, HOSTNAME_VAR));
        }

        if let Some(page_url) = read_env_var(&env_fn, PAGE_URL_VAR)? {
            return Ok(HostnameReading::new(
                hostname_from_page_url(&page_url)?,
                PAGE_URL_VAR,
            ));
        }

        Err(ApiConfError::HostnameUnavailable {
            tried: format!("--hostname, --page-url, {}, {}", HOSTNAME_VAR, PAGE_URL_VAR),
        })
    }
}

impl HostnameSource for HostnameDetector {
    fn read_hostname(&self) -> Result<HostnameReading> {
        self.with_env(|key| std::env::var(key)).read_hostname()
    }
}

impl HostnameDetector {
    /// Use this detector as a [`HostnameSource`] that reads variables
    /// through `env_fn` instead of the process environment.
    pub fn with_env<F>(&self, env_fn: F) -> DetectorWithEnv<'_, F>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        DetectorWithEnv {
            detector: self,
            env_fn,
        }
    }
}

/// A [`HostnameDetector`] bound to an env var lookup.
pub struct DetectorWithEnv<'a, F> {
    detector: &'a HostnameDetector,
    env_fn: F,
}

impl<F> HostnameSource for DetectorWithEnv<'_, F>
where
    F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
{
    fn read_hostname(&self) -> Result<HostnameReading> {
        let reading = self.detector.detect_with_env(&self.env_fn)?;
        tracing::debug!(
            "Read hostname '{}' via {}",
            reading.hostname,
            reading.read_via
        );
        Ok(reading)
    }
}
