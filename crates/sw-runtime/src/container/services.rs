//! Service wiring: dispatcher and offscreen initializer.
//!
//! The two share nothing; the container only owns them side by side.

use std::sync::Arc;

use sw_01_offscreen::{OffscreenHost, OffscreenService};
use sw_02_dispatch::{ActionKind, HandlerRegistry, MessageDispatcher};
use tracing::{info, warn};

use crate::adapters::PageFetcher;
use crate::container::RuntimeConfig;
use crate::handlers::FetchIconHandler;

/// Handler table for every known action.
pub fn build_registry<F>(fetcher: Arc<F>) -> HandlerRegistry
where
    F: PageFetcher + 'static,
{
    let registry = HandlerRegistry::builder()
        .register(ActionKind::FetchIconByDomain, FetchIconHandler::new(fetcher))
        .build();

    for kind in registry.missing_kinds() {
        warn!(action = %kind, "No handler registered; requests will go unanswered");
    }
    registry
}

/// Process-wide services.
pub struct ServiceContainer<H>
where
    H: OffscreenHost + 'static,
{
    pub config: RuntimeConfig,
    pub dispatcher: MessageDispatcher,
    pub offscreen: Arc<OffscreenService<H>>,
}

impl<H> ServiceContainer<H>
where
    H: OffscreenHost + 'static,
{
    pub fn new<F>(config: RuntimeConfig, host: Arc<H>, fetcher: Arc<F>) -> Self
    where
        F: PageFetcher + 'static,
    {
        let dispatcher = MessageDispatcher::new(build_registry(fetcher));
        let offscreen = Arc::new(OffscreenService::new(host, config.offscreen.clone()));

        info!(
            actions = ?dispatcher.registry().kinds(),
            offscreen_url = %config.offscreen.url,
            "Services wired"
        );

        Self {
            config,
            dispatcher,
            offscreen,
        }
    }
}
