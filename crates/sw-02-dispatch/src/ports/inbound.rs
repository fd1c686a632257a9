//! Driving Ports (API - Inbound)
//!
//! The host's inbound-message listener contract.

use shared_types::{InboundRequest, ReplyCallback, SenderDescriptor};

/// Listener registered with the host for inbound requests.
pub trait MessageListener: Send + Sync {
    /// Handle one request.
    ///
    /// Returns `true` iff `reply` will be invoked asynchronously. Returning
    /// `false` means the reply was already sent, or will never be sent.
    fn on_message(
        &self,
        request: InboundRequest,
        sender: SenderDescriptor,
        reply: ReplyCallback,
    ) -> bool;
}
