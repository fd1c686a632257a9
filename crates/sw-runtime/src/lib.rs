//! # Service Worker Runtime
//!
//! The background process: registers the message dispatcher as the inbound
//! listener and, independently, makes sure the offscreen document exists.
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and service wiring
//! - `handlers/` - one handler per action kind
//! - `adapters/` - page fetching and the standalone stdio host
//!
//! ## Startup Sequence
//!
//! ```text
//! load config ──→ init logging ──→ wire services
//!                                      │
//!               ┌──────────────────────┴──────────────────────┐
//!               ↓                                             ↓
//!      dispatcher listens                       offscreen ensure_exists()
//!   (requests served at once)              (runs once, failure is logged only)
//! ```
//!
//! The two branches share no state.

pub mod adapters;
pub mod container;
pub mod error;
pub mod handlers;

use std::future::Future;
use std::sync::Arc;

use sw_01_offscreen::{EnsureOutcome, OffscreenApi, OffscreenHost, OffscreenResult, OffscreenService};
use sw_02_dispatch::MessageDispatcher;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::task::JoinHandle;
use tracing::{error, info, Instrument, Span};

use crate::adapters::{PageFetcher, StdioHost, StdioSummary};
use crate::container::{RuntimeConfig, ServiceContainer};

pub use error::{RuntimeError, RuntimeResult};

/// The background process orchestrating dispatcher and initializer.
pub struct ServiceWorkerRuntime<H>
where
    H: OffscreenHost + 'static,
{
    container: ServiceContainer<H>,
}

impl<H> ServiceWorkerRuntime<H>
where
    H: OffscreenHost + 'static,
{
    pub fn new<F>(config: RuntimeConfig, host: Arc<H>, fetcher: Arc<F>) -> Self
    where
        F: PageFetcher + 'static,
    {
        Self {
            container: ServiceContainer::new(config, host, fetcher),
        }
    }

    /// The inbound listener to register with the host.
    pub fn listener(&self) -> &MessageDispatcher {
        &self.container.dispatcher
    }

    /// The offscreen initializer.
    pub fn offscreen(&self) -> &Arc<OffscreenService<H>> {
        &self.container.offscreen
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.container.config
    }

    /// Kick off offscreen setup in the background.
    ///
    /// The listener does not wait for it. A failed setup is logged and
    /// returned through the handle; the process keeps serving requests.
    pub fn start(&self) -> JoinHandle<OffscreenResult<EnsureOutcome>> {
        info!("Service worker start");
        let offscreen = Arc::clone(&self.container.offscreen);
        tokio::spawn(
            async move {
                let result = offscreen.ensure_exists().await;
                match &result {
                    Ok(outcome) => info!(?outcome, "Offscreen document ready"),
                    Err(e) => error!(error = %e, "Offscreen document setup failed"),
                }
                result
            }
            .instrument(Span::current()),
        )
    }

    /// Serve newline delimited JSON requests until EOF or `shutdown`.
    pub async fn serve_stdio<R, W, S>(&self, input: R, output: W, shutdown: S) -> RuntimeResult<StdioSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
        S: Future<Output = ()>,
    {
        StdioHost::new(self.container.dispatcher.clone())
            .run(input, output, shutdown)
            .await
    }
}
