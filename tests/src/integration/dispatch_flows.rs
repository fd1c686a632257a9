//! # Dispatch Flows
//!
//! Requests go through the runtime's registered listener exactly as the host
//! would deliver them; assertions are on the boolean signal and on the
//! envelope that reaches the reply callback.
//!
//! ## Flows Tested
//!
//! 1. `fetch-icon-by-domain` → deferred, `true`, then `{status: 0}`
//! 2. `unknown-action` → no reply, `false`
//! 3. Synchronous throw → `{status: 1}` before the listener returns, `false`
//! 4. Deferred rejection → `{status: 1}`
//! 5. Interleaved requests complete independently

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;
    use shared_types::{InboundRequest, ReplyCallback, ReplyStatus, SenderDescriptor};
    use sw_01_offscreen::InMemoryOffscreenHost;
    use sw_02_dispatch::{
        handler_fn, ActionKind, HandlerError, HandlerRegistry, MessageDispatcher, MessageListener,
    };
    use sw_runtime::adapters::{FetchError, StaticPageFetcher};
    use sw_runtime::container::RuntimeConfig;
    use sw_runtime::ServiceWorkerRuntime;
    use tokio::time::timeout;
    use tokio_test::assert_ok;
    use url::Url;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn example_fetcher() -> StaticPageFetcher {
        StaticPageFetcher::new()
            .with_redirect(
                Url::parse("https://example.com/").unwrap(),
                Url::parse("https://www.example.com/").unwrap(),
                r#"<link rel="shortcut icon" href="favicon.png">
                   <link rel="apple-touch-icon" href="/touch.png">"#,
            )
            .with_failure(
                Url::parse("https://down.example/").unwrap(),
                FetchError::Request {
                    url: "https://down.example/".into(),
                    reason: "connection reset".into(),
                },
            )
    }

    fn runtime() -> ServiceWorkerRuntime<InMemoryOffscreenHost> {
        ServiceWorkerRuntime::new(
            RuntimeConfig::default(),
            Arc::new(InMemoryOffscreenHost::new()),
            Arc::new(example_fetcher()),
        )
    }

    fn icon_request(domain: &str) -> InboundRequest {
        InboundRequest::new("fetch-icon-by-domain").with_field("domain", domain)
    }

    // =============================================================================
    // INTEGRATION TESTS: LISTENER → HANDLER → ENVELOPE
    // =============================================================================

    #[tokio::test]
    async fn test_fetch_icon_by_domain_replies_asynchronously() {
        let runtime = runtime();
        let (reply, rx) = ReplyCallback::channel();

        let keep_open =
            runtime
                .listener()
                .on_message(icon_request("example.com"), SenderDescriptor::default(), reply);
        assert!(keep_open);

        let envelope = assert_ok!(assert_ok!(timeout(Duration::from_secs(1), rx).await));
        assert_eq!(envelope.status, ReplyStatus::Success);
        assert_eq!(
            envelope.data,
            json!([
                "https://www.example.com/favicon.png",
                "https://www.example.com/touch.png"
            ])
        );
        assert_eq!(
            serde_json::to_value(&envelope).unwrap()["status"],
            json!(0)
        );
    }

    #[tokio::test]
    async fn test_unknown_action_gets_no_reply() {
        let runtime = runtime();
        let (reply, rx) = ReplyCallback::channel();

        let keep_open = runtime.listener().on_message(
            InboundRequest::new("unknown-action"),
            SenderDescriptor::default(),
            reply,
        );

        assert!(!keep_open);
        assert!(rx.await.is_err(), "no envelope may be sent");
    }

    #[tokio::test]
    async fn test_sync_throw_replies_before_return() {
        let dispatcher = MessageDispatcher::new(
            HandlerRegistry::builder()
                .register(
                    ActionKind::FetchIconByDomain,
                    handler_fn(|_, _| Err(HandlerError::failed("boom"))),
                )
                .build(),
        );
        let (reply, mut rx) = ReplyCallback::channel();

        let keep_open =
            dispatcher.on_message(icon_request("example.com"), SenderDescriptor::default(), reply);

        assert!(!keep_open);
        let envelope = assert_ok!(rx.try_recv());
        assert_eq!(envelope.status, ReplyStatus::Failure);
        assert_eq!(envelope.data, json!({ "name": "Error", "message": "boom" }));
    }

    #[tokio::test]
    async fn test_invalid_payload_is_sync_failure() {
        let runtime = runtime();
        let (reply, mut rx) = ReplyCallback::channel();

        let keep_open = runtime.listener().on_message(
            InboundRequest::new("fetch-icon-by-domain"),
            SenderDescriptor::default(),
            reply,
        );

        assert!(!keep_open);
        let envelope = assert_ok!(rx.try_recv());
        assert_eq!(envelope.status, ReplyStatus::Failure);
        assert_eq!(envelope.data["name"], json!("InvalidPayload"));
    }

    #[tokio::test]
    async fn test_deferred_rejection_replies_failure() {
        let runtime = runtime();
        let (reply, rx) = ReplyCallback::channel();

        assert!(runtime.listener().on_message(
            icon_request("down.example"),
            SenderDescriptor::default(),
            reply
        ));

        let envelope = assert_ok!(rx.await);
        assert_eq!(envelope.status, ReplyStatus::Failure);
        assert_eq!(envelope.data["name"], json!("Error"));
        assert!(envelope.data["message"]
            .as_str()
            .unwrap_or_default()
            .contains("connection reset"));
    }

    #[tokio::test]
    async fn test_interleaved_requests_complete_independently() {
        let runtime = runtime();
        let domains = ["example.com", "down.example", "missing.example", "example.com"];

        let receivers: Vec<_> = domains
            .iter()
            .map(|domain| {
                let (reply, rx) = ReplyCallback::channel();
                let sender = SenderDescriptor::extension("popup");
                assert!(runtime.listener().on_message(icon_request(domain), sender, reply));
                rx
            })
            .collect();

        let envelopes: Vec<_> = futures::future::join_all(receivers)
            .await
            .into_iter()
            .map(|r| r.expect("every matched request gets a reply"))
            .collect();

        let statuses: Vec<_> = envelopes.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                ReplyStatus::Success,
                ReplyStatus::Failure,
                ReplyStatus::Failure,
                ReplyStatus::Success
            ]
        );
        assert_eq!(envelopes[0].data, envelopes[3].data);

        let stats = runtime.listener().stats().snapshot();
        assert_eq!(stats.replied(), 4);
        assert_eq!(stats.in_flight(), 0);
    }
}
