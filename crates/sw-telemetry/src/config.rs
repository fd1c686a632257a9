//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for the background process's log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Value of the `env` label attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to write logs to stderr at all
    pub console_output: bool,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Include the event target (module path) in each line
    pub with_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "service_worker".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            with_target: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SW_SERVICE_NAME`: `env` label (default: service_worker)
    /// - `SW_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `SW_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `SW_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `SW_LOG_TARGET`: Include event targets (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`TelemetryConfig::from_env`], reading through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            service_name: lookup("SW_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("SW_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: lookup("SW_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.console_output),

            json_logs: lookup("SW_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),

            with_target: lookup("SW_LOG_TARGET")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.with_target),
        }
    }
}
