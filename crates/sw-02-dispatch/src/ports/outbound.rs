//! Driven Ports (SPI - Outbound Dependencies)
//!
//! Domain handlers plugged into the dispatch table.

use shared_types::{InboundRequest, SenderDescriptor};

use crate::domain::HandlerOutcome;
use crate::error::HandlerResult;

/// A handler for one action kind.
///
/// `Err` is a synchronous failure. `Ok(Ready)` is an immediate value.
/// `Ok(Deferred)` is a value that arrives later and may still fail.
pub trait ActionHandler: Send + Sync {
    fn handle(
        &self,
        request: &InboundRequest,
        sender: &SenderDescriptor,
    ) -> HandlerResult<HandlerOutcome>;
}

/// Handler backed by a closure. Build with [`handler_fn`].
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

/// Wrap a closure as an [`ActionHandler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&InboundRequest, &SenderDescriptor) -> HandlerResult<HandlerOutcome> + Send + Sync,
{
    HandlerFn { f }
}

impl<F> ActionHandler for HandlerFn<F>
where
    F: Fn(&InboundRequest, &SenderDescriptor) -> HandlerResult<HandlerOutcome> + Send + Sync,
{
    fn handle(
        &self,
        request: &InboundRequest,
        sender: &SenderDescriptor,
    ) -> HandlerResult<HandlerOutcome> {
        (self.f)(request, sender)
    }
}
