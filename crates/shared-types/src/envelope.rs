//! # Reply Envelope
//!
//! The `{ status, data }` object delivered through the host's reply callback.
//!
//! - `status = 0`: success, `data` is the handler's result.
//! - `status = 1`: failure, `data` describes the error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ErrorDescription, WireError};

/// Outcome code carried by a [`ReplyEnvelope`].
///
/// Serialized as a bare number, matching what content scripts and the popup
/// compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyStatus {
    /// Handler returned or resolved a value.
    Success,
    /// Handler threw or its deferred value rejected.
    Failure,
}

impl ReplyStatus {
    /// Numeric wire code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            ReplyStatus::Success => 0,
            ReplyStatus::Failure => 1,
        }
    }

    /// Parse a numeric wire code.
    pub fn from_code(code: u8) -> Result<Self, WireError> {
        match code {
            0 => Ok(ReplyStatus::Success),
            1 => Ok(ReplyStatus::Failure),
            other => Err(WireError::InvalidStatus(other)),
        }
    }
}

impl Serialize for ReplyStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for ReplyStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        ReplyStatus::from_code(code).map_err(serde::de::Error::custom)
    }
}

/// The reply delivered for every matched request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    /// 0 on success, 1 on failure.
    pub status: ReplyStatus,
    /// Result value or error description.
    pub data: Value,
}

impl ReplyEnvelope {
    /// Success envelope carrying the handler's value.
    #[must_use]
    pub fn success(data: Value) -> Self {
        Self {
            status: ReplyStatus::Success,
            data,
        }
    }

    /// Failure envelope carrying an arbitrary error payload.
    #[must_use]
    pub fn failure(data: Value) -> Self {
        Self {
            status: ReplyStatus::Failure,
            data,
        }
    }

    /// Failure envelope carrying a structured error description.
    #[must_use]
    pub fn from_error(error: ErrorDescription) -> Self {
        Self::failure(error.into_value())
    }

    /// Returns true for `status = 0`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ReplyStatus::Success
    }

    /// Returns true for `status = 1`.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.status == ReplyStatus::Failure
    }
}
