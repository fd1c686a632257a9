//! # sw-01-offscreen
//!
//! Offscreen document initializer: makes sure exactly one offscreen document
//! exists for the extension, no matter how many callers ask at once.
//!
//! ## Overview
//!
//! - **Idempotent**: if the host already reports the document, nothing is created.
//! - **Single-flight**: at most one creation request is in flight; every
//!   concurrent caller awaits that same request and sees its outcome.
//! - **Retryable**: the guard is cleared when creation resolves, success or
//!   failure, so a later call can try again.
//!
//! ## Creation Guard
//!
//! ```text
//! [EMPTY] ──ensure_exists (no document)──→ [PENDING] ──host resolves/rejects──→ [EMPTY]
//!                                              ↑
//!             concurrent ensure_exists ────────┘ (join, never re-issue)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use sw_01_offscreen::{OffscreenApi, OffscreenDocumentConfig, OffscreenService};
//!
//! let service = OffscreenService::new(host, OffscreenDocumentConfig::default());
//! service.ensure_exists().await?;
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::InMemoryOffscreenHost;
pub use domain::{
    Claim, ContextFilter, ContextType, CreationGuard, ExtensionContext, OffscreenDocumentConfig,
    OffscreenReason, PendingCreation, OFFSCREEN_DOCUMENT_PATH,
};
pub use error::{OffscreenError, OffscreenResult};
pub use ports::inbound::{EnsureOutcome, OffscreenApi};
pub use ports::outbound::{HostError, OffscreenHost};
pub use service::OffscreenService;
