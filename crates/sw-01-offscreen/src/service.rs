//! Offscreen Service - single-flight document creation

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{Claim, ContextFilter, CreationGuard, OffscreenDocumentConfig};
use crate::error::{OffscreenError, OffscreenResult};
use crate::ports::inbound::{EnsureOutcome, OffscreenApi};
use crate::ports::outbound::OffscreenHost;

/// Offscreen initializer.
///
/// Holds the host port, the creation parameters and the creation guard.
/// The guard is injectable so that several service handles (or a test) can
/// share one slot.
pub struct OffscreenService<H>
where
    H: OffscreenHost,
{
    host: Arc<H>,
    config: OffscreenDocumentConfig,
    guard: Arc<CreationGuard>,
}

impl<H> OffscreenService<H>
where
    H: OffscreenHost + 'static,
{
    /// Create a service with its own, empty guard.
    pub fn new(host: Arc<H>, config: OffscreenDocumentConfig) -> Self {
        Self::with_guard(host, config, Arc::new(CreationGuard::new()))
    }

    /// Create a service around an existing guard.
    pub fn with_guard(
        host: Arc<H>,
        config: OffscreenDocumentConfig,
        guard: Arc<CreationGuard>,
    ) -> Self {
        Self {
            host,
            config,
            guard,
        }
    }

    /// The creation guard.
    pub fn guard(&self) -> &Arc<CreationGuard> {
        &self.guard
    }

    /// The creation parameters.
    pub fn config(&self) -> &OffscreenDocumentConfig {
        &self.config
    }

    /// Absolute URL the existence check looks for.
    pub fn document_url(&self) -> String {
        self.host.extension_url(&self.config.url)
    }

    /// Build the host creation call. Nothing runs until it is polled.
    fn creation_future(&self) -> BoxFuture<'static, OffscreenResult<()>> {
        let host = Arc::clone(&self.host);
        let config = self.config.clone();
        async move {
            host.create_instance(config)
                .await
                .map_err(OffscreenError::creation)
        }
        .boxed()
    }

    async fn await_claim(&self, claim: Claim) -> OffscreenResult<EnsureOutcome> {
        match claim {
            Claim::Started(pending) => {
                info!(
                    url = %self.config.url,
                    reasons = ?self.config.reasons,
                    "Creating offscreen document"
                );
                match pending.await {
                    Ok(()) => {
                        info!(url = %self.config.url, "Offscreen document created");
                        Ok(EnsureOutcome::Created)
                    }
                    Err(e) => {
                        // Rejected because another context created it after our check.
                        if matches!(self.has_document().await, Ok(true)) {
                            debug!(error = %e, "Creation rejected but document exists");
                            return Ok(EnsureOutcome::AlreadyExists);
                        }
                        warn!(error = %e, "Offscreen document creation failed");
                        Err(e)
                    }
                }
            }
            Claim::Joined(pending) => {
                pending.await?;
                Ok(EnsureOutcome::Joined)
            }
        }
    }
}

#[async_trait]
impl<H> OffscreenApi for OffscreenService<H>
where
    H: OffscreenHost + 'static,
{
    async fn ensure_exists(&self) -> OffscreenResult<EnsureOutcome> {
        // A creation in flight answers the question without asking the host.
        if let Some(pending) = self.guard.pending() {
            debug!("Offscreen creation pending, awaiting it");
            return self.await_claim(Claim::Joined(pending)).await;
        }

        if self.has_document().await? {
            debug!("Offscreen document already exists");
            return Ok(EnsureOutcome::AlreadyExists);
        }

        // No await between the guard check and the guard set.
        let claim = self.guard.claim(|| self.creation_future());
        self.await_claim(claim).await
    }

    async fn has_document(&self) -> OffscreenResult<bool> {
        let filter = ContextFilter::offscreen(self.document_url());
        let contexts = self
            .host
            .query_existing_instances(&filter)
            .await
            .map_err(OffscreenError::query)?;
        Ok(!contexts.is_empty())
    }

    fn is_creating(&self) -> bool {
        self.guard.is_pending()
    }
}
