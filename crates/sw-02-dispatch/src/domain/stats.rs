//! Dispatch counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for the dispatcher
#[derive(Debug, Default)]
pub struct DispatchStats {
    /// Requests handed to the listener
    pub received: AtomicU64,
    /// Requests with no registered handler
    pub unmatched: AtomicU64,
    /// Requests whose handler returned a deferred value
    pub deferred: AtomicU64,
    /// Success envelopes sent
    pub replied_success: AtomicU64,
    /// Failure envelopes sent
    pub replied_failure: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStatsSnapshot {
    pub received: u64,
    pub unmatched: u64,
    pub deferred: u64,
    pub replied_success: u64,
    pub replied_failure: u64,
}

impl DispatchStats {
    /// Read every counter.
    pub fn snapshot(&self) -> DispatchStatsSnapshot {
        DispatchStatsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            unmatched: self.unmatched.load(Ordering::Relaxed),
            deferred: self.deferred.load(Ordering::Relaxed),
            replied_success: self.replied_success.load(Ordering::Relaxed),
            replied_failure: self.replied_failure.load(Ordering::Relaxed),
        }
    }
}

impl DispatchStatsSnapshot {
    /// Envelopes sent so far.
    #[must_use]
    pub fn replied(&self) -> u64 {
        self.replied_success + self.replied_failure
    }

    /// Deferred requests still waiting on their handler.
    #[must_use]
    pub fn in_flight(&self) -> u64 {
        let matched = self.received.saturating_sub(self.unmatched);
        matched.saturating_sub(self.replied())
    }
}
