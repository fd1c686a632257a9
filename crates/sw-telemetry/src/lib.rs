//! # Service Worker Telemetry
//!
//! Logging setup for the background process. Output goes to stderr so the
//! standalone runtime can keep stdout for reply envelopes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sw_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SW_SERVICE_NAME` | `service_worker` | `env` label on every line |
//! | `SW_LOG_LEVEL` | `info` | Level filter (falls back to `RUST_LOG`) |
//! | `SW_CONSOLE_OUTPUT` | `true` | Write logs at all |
//! | `SW_JSON_LOGS` | `false` | JSON formatted output |
//! | `SW_LOG_TARGET` | `true` | Include module targets |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, root_span};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install global subscriber: {0}")]
    Init(String),
}
