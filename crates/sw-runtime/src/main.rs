//! # Service Worker Runtime
//!
//! Runs the background process against the standalone host: requests on
//! stdin, reply envelopes on stdout, logs on stderr.
//!
//! ## Startup Sequence
//!
//! 1. Load telemetry configuration and install the subscriber
//! 2. Load and validate runtime configuration
//! 3. Wire dispatcher and offscreen initializer
//! 4. Start offscreen setup, serve requests
//! 5. Ctrl-C or EOF: drain in-flight replies and exit

use std::sync::Arc;

use anyhow::{Context, Result};
use sw_01_offscreen::InMemoryOffscreenHost;
use sw_runtime::adapters::ReqwestPageFetcher;
use sw_runtime::container::RuntimeConfig;
use sw_runtime::ServiceWorkerRuntime;
use sw_telemetry::{init_logging, log_event, root_span, TelemetryConfig};
use tokio::io::BufReader;
use tracing::{info, warn, Instrument};

/// Resolves on Ctrl-C. Never resolves if the signal cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl-C; stopping on EOF only");
        std::future::pending::<()>().await;
    }
}

async fn run(config: RuntimeConfig) -> Result<()> {
    let fetcher = ReqwestPageFetcher::new(&config.fetch).context("Failed to build page fetcher")?;
    let host = Arc::new(InMemoryOffscreenHost::new());
    let runtime = ServiceWorkerRuntime::new(config, host, Arc::new(fetcher));

    let setup = runtime.start();

    info!("Listening for requests on stdin");
    let summary = runtime
        .serve_stdio(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            ctrl_c(),
        )
        .await
        .context("Request loop failed")?;

    // Outcome is logged by the setup task itself.
    if !setup.is_finished() {
        setup.abort();
    }

    let stats = runtime.listener().stats().snapshot();
    log_event!(
        info,
        "runtime",
        "Shutdown complete",
        requests = summary.requests,
        malformed = summary.malformed,
        replies = summary.replies,
        unmatched = stats.unmatched,
        failures = stats.replied_failure
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_logging(&telemetry).context("Failed to initialize logging")?;

    let span = root_span(&telemetry);
    async move {
        let config = RuntimeConfig::from_env().context("Invalid configuration")?;
        config.validate().context("Invalid configuration")?;
        run(config).await
    }
    .instrument(span)
    .await
}
