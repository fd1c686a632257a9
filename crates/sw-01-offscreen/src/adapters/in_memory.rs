//! In-memory host.
//!
//! Stands in for the browser's runtime/offscreen APIs in the standalone
//! runtime and in tests. Behaves like the host where it matters: only one
//! offscreen document may exist, and creation is asynchronous.
//!
//! Test controls:
//! - `hold_creations` / `release_creations`: keep creation calls pending
//! - `fail_creations` / `fail_queries`: inject host rejections
//! - `create_calls`: number of creation requests received

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::watch;
use tracing::debug;

use crate::domain::{ContextFilter, ContextType, ExtensionContext, OffscreenDocumentConfig};
use crate::ports::outbound::{HostError, OffscreenHost};

/// Base URL used when none is given.
pub const DEFAULT_BASE_URL: &str = "chrome-extension://in-memory/";

/// In-memory implementation of [`OffscreenHost`].
pub struct InMemoryOffscreenHost {
    base_url: String,
    contexts: RwLock<Vec<ExtensionContext>>,
    next_context_id: AtomicU64,
    create_calls: AtomicUsize,
    query_calls: AtomicUsize,
    last_config: Mutex<Option<OffscreenDocumentConfig>>,
    creation_failure: Mutex<Option<String>>,
    query_failure: Mutex<Option<HostError>>,
    /// `true` while creations may complete.
    gate: watch::Sender<bool>,
}

impl InMemoryOffscreenHost {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Host whose extension URLs start with `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let (gate, _) = watch::channel(true);
        Self {
            base_url,
            contexts: RwLock::new(Vec::new()),
            next_context_id: AtomicU64::new(1),
            create_calls: AtomicUsize::new(0),
            query_calls: AtomicUsize::new(0),
            last_config: Mutex::new(None),
            creation_failure: Mutex::new(None),
            query_failure: Mutex::new(None),
            gate,
        }
    }

    /// Register an offscreen document as if created earlier.
    pub fn insert_document(&self, path: &str) {
        let context = self.new_context(path);
        self.contexts.write().push(context);
    }

    /// Close every offscreen document.
    pub fn close_documents(&self) -> usize {
        let mut contexts = self.contexts.write();
        let before = contexts.len();
        contexts.retain(|c| c.context_type != ContextType::OffscreenDocument);
        before - contexts.len()
    }

    /// Keep creation calls pending until `release_creations`.
    pub fn hold_creations(&self) {
        self.gate.send_replace(false);
    }

    /// Let held and future creation calls complete.
    pub fn release_creations(&self) {
        self.gate.send_replace(true);
    }

    /// Reject every creation with `reason` until `clear_failure`.
    pub fn fail_creations(&self, reason: impl Into<String>) {
        *self.creation_failure.lock() = Some(reason.into());
    }

    /// Fail every existence query with `error` until `clear_failure`.
    pub fn fail_queries(&self, error: HostError) {
        *self.query_failure.lock() = Some(error);
    }

    /// Remove injected failures.
    pub fn clear_failure(&self) {
        *self.creation_failure.lock() = None;
        *self.query_failure.lock() = None;
    }

    /// Number of creation requests received.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of existence queries received.
    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    /// Config passed with the latest creation request.
    pub fn last_config(&self) -> Option<OffscreenDocumentConfig> {
        self.last_config.lock().clone()
    }

    /// Number of live offscreen documents.
    pub fn document_count(&self) -> usize {
        self.contexts
            .read()
            .iter()
            .filter(|c| c.context_type == ContextType::OffscreenDocument)
            .count()
    }

    fn new_context(&self, path: &str) -> ExtensionContext {
        let id = self.next_context_id.fetch_add(1, Ordering::Relaxed);
        ExtensionContext {
            context_id: format!("offscreen-{id}"),
            context_type: ContextType::OffscreenDocument,
            document_url: Some(self.extension_url(path)),
        }
    }
}

impl Default for InMemoryOffscreenHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OffscreenHost for InMemoryOffscreenHost {
    fn extension_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn query_existing_instances(
        &self,
        filter: &ContextFilter,
    ) -> Result<Vec<ExtensionContext>, HostError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.query_failure.lock().clone() {
            return Err(err);
        }

        Ok(self
            .contexts
            .read()
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn create_instance(&self, config: OffscreenDocumentConfig) -> Result<(), HostError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_config.lock() = Some(config.clone());

        let mut gate = self.gate.subscribe();
        // The sender lives as long as `self`, so this only returns once open.
        let _ = gate.wait_for(|open| *open).await;

        if let Some(reason) = self.creation_failure.lock().clone() {
            debug!(reason = %reason, "In-memory host rejecting creation");
            return Err(HostError::Rejected(reason));
        }
        if config.reasons.is_empty() {
            return Err(HostError::Rejected(
                "at least one reason must be provided".into(),
            ));
        }
        if self.document_count() > 0 {
            return Err(HostError::Rejected(
                "Only a single offscreen document may be created.".into(),
            ));
        }

        let context = self.new_context(&config.url);
        debug!(context_id = %context.context_id, "In-memory host created offscreen document");
        self.contexts.write().push(context);
        Ok(())
    }
}
