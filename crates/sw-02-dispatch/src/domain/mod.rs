//! Domain layer for the dispatcher

pub mod action;
pub mod outcome;
pub mod stats;

pub use action::{ActionKind, UnknownAction};
pub use outcome::{DeferredReply, Dispatch, HandlerOutcome};
pub use stats::{DispatchStats, DispatchStatsSnapshot};
