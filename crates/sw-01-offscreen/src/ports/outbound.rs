//! Driven Ports (SPI - Outbound Dependencies)
//!
//! The host's runtime/offscreen API, reduced to what the initializer needs.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ContextFilter, ExtensionContext, OffscreenDocumentConfig};

/// Errors reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Host refused the call (bad config, duplicate document, ...)
    #[error("host rejected request: {0}")]
    Rejected(String),

    /// Host API not reachable
    #[error("host unavailable: {0}")]
    Unavailable(String),
}

/// Host auxiliary-context contract.
#[async_trait]
pub trait OffscreenHost: Send + Sync {
    /// Absolute URL of an extension-relative path.
    fn extension_url(&self, path: &str) -> String;

    /// Live contexts matching `filter`.
    async fn query_existing_instances(
        &self,
        filter: &ContextFilter,
    ) -> Result<Vec<ExtensionContext>, HostError>;

    /// Create the offscreen document. `config` is forwarded verbatim.
    async fn create_instance(&self, config: OffscreenDocumentConfig) -> Result<(), HostError>;
}
