//! # Shared Types Crate
//!
//! Wire types exchanged between the host and the background process.
//!
//! ## Design Principles
//!
//! - **One Reply Shape**: every matched request is answered with exactly one
//!   [`ReplyEnvelope`] (`{ status: 0 | 1, data }`).
//! - **Consumed Replies**: [`ReplyCallback`] is taken by value when a reply is
//!   sent, so a second reply for the same request does not type-check.
//! - **Opaque Sender**: [`SenderDescriptor`] is forwarded to handlers as-is.

pub mod envelope;
pub mod errors;
pub mod ipc;
pub mod reply;

pub use envelope::{ReplyEnvelope, ReplyStatus};
pub use errors::{ErrorDescription, WireError};
pub use ipc::{InboundRequest, SenderDescriptor};
pub use reply::ReplyCallback;
