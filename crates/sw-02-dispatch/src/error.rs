//! Error types for handler invocations
//!
//! Everything here ends up in a failure envelope; nothing propagates to the
//! host as an error.

use shared_types::ErrorDescription;
use thiserror::Error;

/// Handler failure, thrown synchronously or carried by a rejected deferred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Request payload is missing a field or has the wrong shape
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Handler ran and failed
    #[error("{0}")]
    Failed(String),

    /// Handler panicked; the panic was caught at the dispatcher boundary
    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    pub fn invalid_payload(details: impl Into<String>) -> Self {
        HandlerError::InvalidPayload(details.into())
    }

    pub fn failed(details: impl Into<String>) -> Self {
        HandlerError::Failed(details.into())
    }

    /// Error class name placed in the envelope.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            HandlerError::InvalidPayload(_) => "InvalidPayload",
            HandlerError::Failed(_) => "Error",
            HandlerError::Panicked(_) => "Panic",
        }
    }

    /// Description carried in `ReplyEnvelope::data`.
    #[must_use]
    pub fn describe(&self) -> ErrorDescription {
        ErrorDescription::new(self.name(), self.to_string())
    }

    /// Build from a caught panic payload.
    pub(crate) fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        HandlerError::Panicked(message)
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(e: serde_json::Error) -> Self {
        HandlerError::InvalidPayload(e.to_string())
    }
}

/// Result type for handler invocations
pub type HandlerResult<T> = Result<T, HandlerError>;
