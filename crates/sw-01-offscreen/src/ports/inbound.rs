//! Driving Ports (API - Inbound)

use async_trait::async_trait;

use crate::error::OffscreenResult;

/// How `ensure_exists` was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The host already had the document; nothing was created.
    AlreadyExists,
    /// This caller issued the creation request.
    Created,
    /// Another caller's creation was pending and this caller awaited it.
    Joined,
}

/// Offscreen initializer API.
#[async_trait]
pub trait OffscreenApi: Send + Sync {
    /// Make sure the offscreen document exists.
    ///
    /// Never issues a second creation while one is pending; every caller
    /// awaiting the same creation gets the same result.
    async fn ensure_exists(&self) -> OffscreenResult<EnsureOutcome>;

    /// Whether the host currently reports the offscreen document.
    async fn has_document(&self) -> OffscreenResult<bool>;

    /// Whether a creation request is in flight.
    fn is_creating(&self) -> bool;
}
