//! Message Dispatcher - routes inbound requests to handlers

use futures::FutureExt;
use shared_types::{InboundRequest, ReplyCallback, ReplyEnvelope, ReplyStatus, SenderDescriptor};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::domain::{DeferredReply, Dispatch, DispatchStats, HandlerOutcome};
use crate::error::{HandlerError, HandlerResult};
use crate::ports::inbound::MessageListener;
use crate::registry::HandlerRegistry;

/// Inbound listener over an immutable handler table.
///
/// Cheap to clone; clones share the table and the counters.
#[derive(Debug, Clone)]
pub struct MessageDispatcher {
    registry: Arc<HandlerRegistry>,
    stats: Arc<DispatchStats>,
}

impl MessageDispatcher {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            stats: Arc::new(DispatchStats::default()),
        }
    }

    /// The dispatch table.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Get statistics
    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    /// Dispatch one request.
    ///
    /// Sends at most one envelope through `reply`. Deferred outcomes are
    /// driven on the current tokio runtime; the returned handle resolves
    /// once their envelope has been sent.
    pub fn dispatch(
        &self,
        request: InboundRequest,
        sender: SenderDescriptor,
        reply: ReplyCallback,
    ) -> Dispatch {
        self.stats.received.fetch_add(1, Ordering::Relaxed);
        let request_id = Uuid::new_v4();

        let Some((kind, handler)) = self.registry.resolve(&request.action) else {
            self.stats.unmatched.fetch_add(1, Ordering::Relaxed);
            debug!(
                %request_id,
                action = %request.action,
                "No handler for action, leaving request unanswered"
            );
            return Dispatch::Unmatched;
        };

        debug!(%request_id, action = %kind, sender = ?sender.id, "Dispatching request");

        let invoked = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(&request, &sender)))
            .unwrap_or_else(|payload| Err(HandlerError::from_panic(payload.as_ref())));

        match invoked {
            Ok(HandlerOutcome::Ready(value)) => {
                Dispatch::Replied(self.send(request_id, reply, Ok(value)))
            }
            Err(e) => Dispatch::Replied(self.send(request_id, reply, Err(e))),
            Ok(HandlerOutcome::Deferred(deferred)) => self.defer(request_id, deferred, reply),
        }
    }

    fn defer(&self, request_id: Uuid, deferred: DeferredReply, reply: ReplyCallback) -> Dispatch {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(%request_id, error = %e, "No runtime to drive deferred reply");
                let status = self.send(request_id, reply, Err(HandlerError::failed(e.to_string())));
                return Dispatch::Replied(status);
            }
        };

        self.stats.deferred.fetch_add(1, Ordering::Relaxed);
        let this = self.clone();
        let task = runtime.spawn(async move {
            let result = AssertUnwindSafe(deferred)
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| Err(HandlerError::from_panic(payload.as_ref())));
            this.send(request_id, reply, result)
        });

        debug!(%request_id, "Reply deferred, keeping channel open");
        Dispatch::Deferred(task)
    }

    /// Wrap the result in an envelope and hand it to the host.
    fn send(
        &self,
        request_id: Uuid,
        reply: ReplyCallback,
        result: HandlerResult<serde_json::Value>,
    ) -> ReplyStatus {
        let envelope = match result {
            Ok(value) => {
                self.stats.replied_success.fetch_add(1, Ordering::Relaxed);
                ReplyEnvelope::success(value)
            }
            Err(e) => {
                self.stats.replied_failure.fetch_add(1, Ordering::Relaxed);
                warn!(%request_id, error = %e, "Handler failed");
                ReplyEnvelope::from_error(e.describe())
            }
        };

        let status = envelope.status;
        reply.send(envelope);
        debug!(%request_id, status = status.code(), "Reply sent");
        status
    }
}

impl MessageListener for MessageDispatcher {
    fn on_message(
        &self,
        request: InboundRequest,
        sender: SenderDescriptor,
        reply: ReplyCallback,
    ) -> bool {
        self.dispatch(request, sender, reply).keeps_channel_open()
    }
}
