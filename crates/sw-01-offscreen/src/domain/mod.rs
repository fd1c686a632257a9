//! Domain layer for the offscreen initializer

pub mod document;
pub mod guard;

pub use document::{
    ContextFilter, ContextType, ExtensionContext, OffscreenDocumentConfig, OffscreenReason,
    OFFSCREEN_DOCUMENT_PATH,
};
pub use guard::{Claim, CreationGuard, PendingCreation};
