//! Error types for the offscreen initializer

use thiserror::Error;

use crate::ports::outbound::HostError;

/// Offscreen initializer errors.
///
/// `Clone` because one creation outcome is handed to every caller that
/// joined the pending creation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OffscreenError {
    /// Host failed to list existing contexts
    #[error("Failed to query existing contexts: {reason}")]
    Query { reason: String },

    /// Host rejected the creation request
    #[error("Offscreen document creation failed: {reason}")]
    Creation { reason: String },
}

impl OffscreenError {
    pub(crate) fn query(err: HostError) -> Self {
        OffscreenError::Query {
            reason: err.to_string(),
        }
    }

    pub(crate) fn creation(err: HostError) -> Self {
        OffscreenError::Creation {
            reason: err.to_string(),
        }
    }
}

/// Result type for offscreen operations
pub type OffscreenResult<T> = Result<T, OffscreenError>;
