//! Runtime error types

use sw_01_offscreen::OffscreenError;
use sw_telemetry::TelemetryError;
use thiserror::Error;

use crate::adapters::FetchError;
use crate::container::ConfigError;

/// Errors raised while starting or running the background process.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("Offscreen setup failed: {0}")]
    Offscreen(#[from] OffscreenError),

    #[error("Page fetcher setup failed: {0}")]
    Fetcher(#[from] FetchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
