//! # Error Types
//!
//! Error payloads that travel inside failure envelopes, and errors raised
//! while decoding wire values.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors decoding wire values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Reply status outside `0 | 1`.
    #[error("Invalid reply status: {0}")]
    InvalidStatus(u8),
}

/// Serializable description of a failed handler invocation.
///
/// Mirrors the `{ name, message }` pair scripts read off a thrown error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescription {
    /// Error class, e.g. `InvalidPayload`.
    pub name: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorDescription {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Convert into the JSON value placed in `ReplyEnvelope::data`.
    #[must_use]
    pub fn into_value(self) -> Value {
        serde_json::json!({
            "name": self.name,
            "message": self.message,
        })
    }
}

impl fmt::Display for ErrorDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}
