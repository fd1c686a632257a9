//! Handler outcomes and per-request dispatch results.

use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use serde_json::Value;
use shared_types::ReplyStatus;
use std::future::Future;
use tokio::task::JoinHandle;

use crate::error::HandlerResult;

/// Deferred handler result.
pub type DeferredReply = BoxFuture<'static, HandlerResult<Value>>;

/// What a handler produced, tagged by timing.
pub enum HandlerOutcome {
    /// Value available now; replied to before the listener returns.
    Ready(Value),
    /// Value arrives later; the reply channel is kept open.
    Deferred(DeferredReply),
}

impl HandlerOutcome {
    /// Immediate outcome from any serializable value.
    pub fn ready<T: Serialize>(value: T) -> HandlerResult<Self> {
        Ok(HandlerOutcome::Ready(serde_json::to_value(value)?))
    }

    /// Deferred outcome from a future.
    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = HandlerResult<Value>> + Send + 'static,
    {
        HandlerOutcome::Deferred(future.boxed())
    }

    /// Whether the reply will arrive asynchronously.
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, HandlerOutcome::Deferred(_))
    }
}

impl std::fmt::Debug for HandlerOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandlerOutcome::Ready(v) => f.debug_tuple("Ready").field(v).finish(),
            HandlerOutcome::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// What the dispatcher did with one request.
#[derive(Debug)]
pub enum Dispatch {
    /// No handler for the action; nothing was sent.
    Unmatched,
    /// Envelope already sent before returning.
    Replied(ReplyStatus),
    /// Envelope will be sent by the spawned task, which yields its status.
    Deferred(JoinHandle<ReplyStatus>),
}

impl Dispatch {
    /// The host's "will reply asynchronously" signal.
    #[must_use]
    pub fn keeps_channel_open(&self) -> bool {
        matches!(self, Dispatch::Deferred(_))
    }

    /// Status of an envelope already sent, if any.
    #[must_use]
    pub fn replied_status(&self) -> Option<ReplyStatus> {
        match self {
            Dispatch::Replied(status) => Some(*status),
            _ => None,
        }
    }
}
