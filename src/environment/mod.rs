//! Environment detection and resolution.
//!
//! Determines which environment the client is running in. The priority
//! chain is:
//!
//! 1. Explicit `--env` flag
//! 2. Hostname classification: `localhost` and `127.0.0.1` are
//!    development, everything else is production
//!
//! An unreadable hostname is an error, never a silent default.

pub mod detection;
pub mod resolver;

pub use detection::{
    hostname_from_page_url, Classification, DetectorWithEnv, FixedHostname, HostnameDetector, HostnameReading,
    HostnameSource, HOSTNAME_VAR, LOCAL_HOSTNAMES, PAGE_URL_VAR,
};
pub use resolver::{EnvironmentResolver, EnvironmentSource, ResolvedEnvironment};
