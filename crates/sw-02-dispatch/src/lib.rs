//! # sw-02-dispatch
//!
//! Inbound message dispatcher for the background process.
//!
//! ## Overview
//!
//! The host calls the registered listener with `(request, sender, reply)` and
//! expects a boolean back: `true` if `reply` will be called later, `false` if
//! it has already been called (or never will be). The dispatcher:
//!
//! - resolves `request.action` to an [`ActionKind`] and its handler,
//! - invokes the handler,
//! - turns the handler's outcome into exactly one [`ReplyEnvelope`],
//! - returns the boolean that matches the branch it took.
//!
//! ## Per-Request State Machine
//!
//! ```text
//! Received ──no handler──→ Unmatched                      (no reply, false)
//!    │
//!    └──handler──→ Err(e)        ──→ RepliedFailure       (status 1, false)
//!                  Ok(Ready(v))  ──→ RepliedSuccess       (status 0, false)
//!                  Ok(Deferred)  ──→ AsyncPending         (true)
//!                                      ├─ Ok(v)  → RepliedSuccess (status 0)
//!                                      └─ Err(e) → RepliedFailure (status 1)
//! ```
//!
//! Handlers say up front, through [`HandlerOutcome`], whether their result
//! is immediate or deferred.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sw_02_dispatch::{handler_fn, ActionKind, HandlerOutcome, HandlerRegistry, MessageDispatcher};
//!
//! let registry = HandlerRegistry::builder()
//!     .register(ActionKind::FetchIconByDomain, handler_fn(|req, _sender| {
//!         Ok(HandlerOutcome::Ready(serde_json::json!(req.str_field("domain"))))
//!     }))
//!     .build();
//!
//! let dispatcher = MessageDispatcher::new(registry);
//! let keep_open = dispatcher.on_message(request, sender, reply);
//! ```
//!
//! [`ReplyEnvelope`]: shared_types::ReplyEnvelope

pub mod domain;
pub mod error;
pub mod ports;
pub mod registry;
pub mod service;

pub use domain::{
    ActionKind, DeferredReply, Dispatch, DispatchStats, DispatchStatsSnapshot, HandlerOutcome,
    UnknownAction,
};
pub use error::{HandlerError, HandlerResult};
pub use ports::inbound::MessageListener;
pub use ports::outbound::{handler_fn, ActionHandler, HandlerFn};
pub use registry::{HandlerRegistry, HandlerRegistryBuilder};
pub use service::MessageDispatcher;
