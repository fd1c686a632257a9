//! # Runtime Configuration
//!
//! Offscreen document parameters and icon-fetch settings.
//!
//! Every field has a default matching the packaged extension; environment
//! variables override individual fields:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SW_OFFSCREEN_PATH` | offscreen document path |
//! | `SW_OFFSCREEN_REASONS` | comma separated reasons, e.g. `BLOBS,CLIPBOARD` |
//! | `SW_OFFSCREEN_JUSTIFICATION` | justification shown to the host |
//! | `SW_FETCH_TIMEOUT_SECS` | icon page fetch timeout |
//! | `SW_USER_AGENT` | user agent for icon page fetches |

use std::time::Duration;

use sw_01_offscreen::{OffscreenDocumentConfig, OffscreenReason};
use thiserror::Error;

/// Default icon page fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Default user agent for icon page fetches.
pub const DEFAULT_USER_AGENT: &str = concat!("sw-runtime/", env!("CARGO_PKG_VERSION"));

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    /// Offscreen document creation parameters.
    pub offscreen: OffscreenDocumentConfig,
    /// Icon fetch configuration.
    pub fetch: FetchConfig,
}

/// HTTP settings for the icon handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Whole-request timeout.
    pub timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Offscreen document path must not be empty")]
    EmptyOffscreenPath,

    #[error("Offscreen document needs at least one reason")]
    NoOffscreenReasons,

    #[error("Offscreen justification must not be empty")]
    EmptyJustification,

    #[error("Fetch timeout must be greater than zero")]
    ZeroFetchTimeout,
}

impl RuntimeConfig {
    /// Defaults overridden from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("SW_OFFSCREEN_PATH") {
            config.offscreen.url = path;
        }
        if let Some(reasons) = lookup("SW_OFFSCREEN_REASONS") {
            config.offscreen.reasons = parse_reasons(&reasons)?;
        }
        if let Some(justification) = lookup("SW_OFFSCREEN_JUSTIFICATION") {
            config.offscreen.justification = justification;
        }
        if let Some(secs) = lookup("SW_FETCH_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "SW_FETCH_TIMEOUT_SECS",
                value: secs.clone(),
            })?;
            config.fetch.timeout = Duration::from_secs(secs);
        }
        if let Some(user_agent) = lookup("SW_USER_AGENT") {
            config.fetch.user_agent = user_agent;
        }

        Ok(config)
    }

    /// Reject configurations the host would refuse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.offscreen.url.trim().is_empty() {
            return Err(ConfigError::EmptyOffscreenPath);
        }
        if self.offscreen.reasons.is_empty() {
            return Err(ConfigError::NoOffscreenReasons);
        }
        if self.offscreen.justification.trim().is_empty() {
            return Err(ConfigError::EmptyJustification);
        }
        if self.fetch.timeout.is_zero() {
            return Err(ConfigError::ZeroFetchTimeout);
        }
        Ok(())
    }
}

fn parse_reasons(raw: &str) -> Result<Vec<OffscreenReason>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|name| {
            serde_json::from_value(serde_json::Value::String(name.to_string())).map_err(|_| {
                ConfigError::InvalidValue {
                    key: "SW_OFFSCREEN_REASONS",
                    value: name.to_string(),
                }
            })
        })
        .collect()
}
