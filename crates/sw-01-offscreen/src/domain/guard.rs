//! Creation guard: the single pending-creation slot.
//!
//! The slot is either empty or holds one shared creation future. Claiming the
//! slot is a check-then-set under one lock with no await in between, so two
//! callers can never both start a creation.

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::error::OffscreenResult;

/// A creation in flight. Cloning yields another handle to the same outcome.
pub type PendingCreation = Shared<BoxFuture<'static, OffscreenResult<()>>>;

/// Result of claiming the guard.
pub enum Claim {
    /// The slot was empty; this caller installed a new creation.
    Started(PendingCreation),
    /// A creation was already pending; this caller joins it.
    Joined(PendingCreation),
}

impl Claim {
    /// The pending creation, whichever way it was obtained.
    pub fn into_pending(self) -> PendingCreation {
        match self {
            Claim::Started(p) | Claim::Joined(p) => p,
        }
    }
}

impl std::fmt::Debug for Claim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Claim::Started(_) => f.write_str("Claim::Started"),
            Claim::Joined(_) => f.write_str("Claim::Joined"),
        }
    }
}

/// Statistics for the creation guard
#[derive(Debug, Default)]
pub struct GuardStats {
    /// Creations installed
    pub started: AtomicU64,
    /// Callers that joined an existing creation
    pub joined: AtomicU64,
}

/// Process-wide slot for the pending offscreen creation.
///
/// Owned by the initializer and injected into it, so tests can inspect or
/// share it.
#[derive(Default)]
pub struct CreationGuard {
    slot: Mutex<Option<PendingCreation>>,
    stats: GuardStats,
}

impl CreationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the pending creation, if any.
    pub fn pending(&self) -> Option<PendingCreation> {
        self.slot.lock().clone()
    }

    /// Whether a creation is pending.
    pub fn is_pending(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Claim the slot.
    ///
    /// If empty, `start` is called to build the creation future, which is
    /// wrapped so that the slot empties itself once the future resolves.
    /// If a creation is pending, `start` is not called and the existing
    /// creation is returned.
    pub fn claim<F>(self: &Arc<Self>, start: F) -> Claim
    where
        F: FnOnce() -> BoxFuture<'static, OffscreenResult<()>>,
    {
        let mut slot = self.slot.lock();

        if let Some(pending) = slot.as_ref() {
            self.stats.joined.fetch_add(1, Ordering::Relaxed);
            debug!("Offscreen creation already pending, joining");
            return Claim::Joined(pending.clone());
        }

        let creation = start();
        let guard = Arc::clone(self);
        let pending = async move {
            let result = creation.await;
            guard.release();
            result
        }
        .boxed()
        .shared();

        *slot = Some(pending.clone());
        self.stats.started.fetch_add(1, Ordering::Relaxed);
        debug!("Offscreen creation started");

        Claim::Started(pending)
    }

    /// Empty the slot.
    fn release(&self) {
        if self.slot.lock().take().is_some() {
            debug!("Offscreen creation settled, guard cleared");
        }
    }

    /// Get statistics
    pub fn stats(&self) -> &GuardStats {
        &self.stats
    }
}

impl std::fmt::Debug for CreationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreationGuard")
            .field("pending", &self.is_pending())
            .finish()
    }
}
