//! # Reply Callback
//!
//! The host's `sendResponse` function, modelled as a one-shot value.

use std::fmt;

use tokio::sync::oneshot;

use crate::envelope::ReplyEnvelope;

type ReplyFn = Box<dyn FnOnce(ReplyEnvelope) + Send + 'static>;

/// One-shot reply channel for a single inbound request.
///
/// `send` consumes the callback, so at most one envelope can ever be
/// delivered through it.
pub struct ReplyCallback {
    inner: ReplyFn,
}

impl ReplyCallback {
    /// Wrap a host reply function.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(ReplyEnvelope) + Send + 'static,
    {
        Self { inner: Box::new(f) }
    }

    /// Callback backed by a oneshot channel.
    ///
    /// The receiver yields the envelope, or an error if the callback was
    /// dropped without replying.
    #[must_use]
    pub fn channel() -> (Self, oneshot::Receiver<ReplyEnvelope>) {
        let (tx, rx) = oneshot::channel();
        let callback = Self::new(move |envelope| {
            // Receiver gone means the requester stopped listening.
            let _ = tx.send(envelope);
        });
        (callback, rx)
    }

    /// Deliver the envelope to the host.
    pub fn send(self, envelope: ReplyEnvelope) {
        (self.inner)(envelope);
    }
}

impl fmt::Debug for ReplyCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyCallback").finish_non_exhaustive()
    }
}
