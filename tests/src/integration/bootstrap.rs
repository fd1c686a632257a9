//! # Bootstrap Flows
//!
//! Runtime startup against the in-memory host, and the offscreen
//! initializer's single-flight guarantees under concurrent callers.
//!
//! ## Flows Tested
//!
//! 1. Startup creates the offscreen document once
//! 2. Startup is a no-op when the document already exists
//! 3. N concurrent initializer calls → one create, N identical outcomes
//! 4. Shared failure, guard cleared, retry creates
//! 5. Requests are served while offscreen creation is still pending

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use futures::future::join_all;
    use shared_types::{InboundRequest, ReplyCallback, SenderDescriptor};
    use sw_01_offscreen::{
        EnsureOutcome, InMemoryOffscreenHost, OffscreenApi, OffscreenError, OFFSCREEN_DOCUMENT_PATH,
    };
    use sw_02_dispatch::MessageListener;
    use sw_runtime::adapters::StaticPageFetcher;
    use sw_runtime::container::RuntimeConfig;
    use sw_runtime::ServiceWorkerRuntime;
    use tokio_test::{assert_err, assert_ok};
    use url::Url;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn runtime_on(host: &Arc<InMemoryOffscreenHost>) -> ServiceWorkerRuntime<InMemoryOffscreenHost> {
        let fetcher = StaticPageFetcher::new()
            .with_page(Url::parse("https://example.com/").unwrap(), "<html></html>");
        ServiceWorkerRuntime::new(RuntimeConfig::default(), Arc::clone(host), Arc::new(fetcher))
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    // =============================================================================
    // INTEGRATION TESTS: STARTUP
    // =============================================================================

    #[tokio::test]
    async fn test_startup_creates_offscreen_document() {
        let host = Arc::new(InMemoryOffscreenHost::new());
        let runtime = runtime_on(&host);

        let outcome = assert_ok!(assert_ok!(runtime.start().await));

        assert_eq!(outcome, EnsureOutcome::Created);
        assert_eq!(host.create_calls(), 1);
        assert_eq!(host.document_count(), 1);
        let config = host.last_config().expect("creation config");
        assert_eq!(config.url, OFFSCREEN_DOCUMENT_PATH);
        assert_eq!(config.justification, "offscreen page");
    }

    #[tokio::test]
    async fn test_startup_is_noop_when_document_exists() {
        let host = Arc::new(InMemoryOffscreenHost::new());
        host.insert_document(OFFSCREEN_DOCUMENT_PATH);
        let runtime = runtime_on(&host);

        let outcome = assert_ok!(assert_ok!(runtime.start().await));

        assert_eq!(outcome, EnsureOutcome::AlreadyExists);
        assert_eq!(host.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_requests_served_while_creation_pending() {
        let host = Arc::new(InMemoryOffscreenHost::new());
        host.hold_creations();
        let runtime = runtime_on(&host);

        let setup = runtime.start();
        settle().await;
        assert!(runtime.offscreen().is_creating());

        let (reply, rx) = ReplyCallback::channel();
        let request = InboundRequest::new("fetch-icon-by-domain").with_field("domain", "example.com");
        assert!(runtime
            .listener()
            .on_message(request, SenderDescriptor::default(), reply));
        let envelope = assert_ok!(rx.await);
        assert!(envelope.is_success());
        assert!(runtime.offscreen().is_creating());

        host.release_creations();
        assert_eq!(assert_ok!(setup.await), Ok(EnsureOutcome::Created));
        assert!(!runtime.offscreen().is_creating());
    }

    // =============================================================================
    // INTEGRATION TESTS: SINGLE-FLIGHT
    // =============================================================================

    #[tokio::test]
    async fn test_concurrent_initializers_share_one_creation() {
        let host = Arc::new(InMemoryOffscreenHost::new());
        host.hold_creations();
        let runtime = runtime_on(&host);

        let callers: Vec<_> = (0..16)
            .map(|_| {
                let offscreen = Arc::clone(runtime.offscreen());
                tokio::spawn(async move { offscreen.ensure_exists().await })
            })
            .collect();

        settle().await;
        assert_eq!(host.create_calls(), 1);

        host.release_creations();
        let outcomes: Vec<_> = join_all(callers)
            .await
            .into_iter()
            .map(|h| h.expect("caller panicked"))
            .collect();

        assert_eq!(host.create_calls(), 1);
        assert_eq!(host.document_count(), 1);
        assert!(outcomes.iter().all(|o| o.is_ok()));
        assert!(!runtime.offscreen().is_creating());
    }

    #[tokio::test]
    async fn test_shared_failure_then_retry() {
        let host = Arc::new(InMemoryOffscreenHost::new());
        host.hold_creations();
        host.fail_creations("Only a single offscreen document may be created.");
        let runtime = runtime_on(&host);

        let callers: Vec<_> = (0..4)
            .map(|_| {
                let offscreen = Arc::clone(runtime.offscreen());
                tokio::spawn(async move { offscreen.ensure_exists().await })
            })
            .collect();
        settle().await;
        host.release_creations();

        let errors: Vec<OffscreenError> = join_all(callers)
            .await
            .into_iter()
            .map(|h| assert_err!(h.expect("caller panicked")))
            .collect();
        assert!(errors.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(host.create_calls(), 1);
        assert!(!runtime.offscreen().is_creating());

        host.clear_failure();
        assert_eq!(
            assert_ok!(runtime.offscreen().ensure_exists().await),
            EnsureOutcome::Created
        );
        assert_eq!(host.create_calls(), 2);
    }
}
