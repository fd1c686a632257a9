//! # Fetch Icon Handler
//!
//! Handles `fetch-icon-by-domain`: `{ "domain": "example.com" }` resolves to
//! the list of icon URLs the site declares.
//!
//! ## Flow
//!
//! ```text
//! domain ──→ https://<domain> ──PageFetcher──→ HTML
//!                                               │
//!                     <link rel="icon" | "shortcut icon" | "apple-touch-icon">
//!                                               │
//!                         resolve href, de-duplicate (first wins)
//!                                               │
//!                  none found? ──→ ["https://<domain>/favicon.ico"]
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use shared_types::{InboundRequest, SenderDescriptor};
use std::sync::Arc;
use sw_02_dispatch::{ActionHandler, HandlerError, HandlerOutcome, HandlerResult};
use tracing::debug;
use url::Url;

use crate::adapters::{FetchError, PageFetcher};

lazy_static! {
    static ref LINK_TAG: Regex = Regex::new(r"(?is)<link\b[^>]*>").expect("link tag pattern");
    static ref ATTRIBUTE: Regex = Regex::new(
        r#"(?is)\b(rel|href)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#
    )
    .expect("attribute pattern");
}

/// `rel` tokens that mark an icon link.
const ICON_RELS: &[&str] = &["icon", "apple-touch-icon"];

/// Handler for [`ActionKind::FetchIconByDomain`](sw_02_dispatch::ActionKind::FetchIconByDomain).
pub struct FetchIconHandler<F> {
    fetcher: Arc<F>,
}

impl<F> FetchIconHandler<F>
where
    F: PageFetcher + 'static,
{
    pub fn new(fetcher: Arc<F>) -> Self {
        Self { fetcher }
    }

    /// Icon URLs for `page_url`, falling back to `/favicon.ico`.
    pub async fn lookup(fetcher: &F, page_url: &Url) -> Result<Vec<String>, FetchError> {
        let page = fetcher.fetch_page(page_url).await?;
        let mut icons = extract_icon_urls(&page.body, &page.url);
        if icons.is_empty() {
            debug!(url = %page.url, "No icon links declared, using favicon.ico");
            icons.push(fallback_icon_url(page_url));
        }
        Ok(icons)
    }
}

impl<F> ActionHandler for FetchIconHandler<F>
where
    F: PageFetcher + 'static,
{
    fn handle(
        &self,
        request: &InboundRequest,
        _sender: &SenderDescriptor,
    ) -> HandlerResult<HandlerOutcome> {
        // Bad input fails before anything is deferred: the reply goes out
        // synchronously and the listener returns `false`.
        let domain = request
            .str_field("domain")
            .ok_or_else(|| HandlerError::invalid_payload("`domain` must be a string"))?;
        let page_url =
            site_url(domain).map_err(|e| HandlerError::invalid_payload(e.to_string()))?;

        let fetcher = Arc::clone(&self.fetcher);
        Ok(HandlerOutcome::deferred(async move {
            let icons = Self::lookup(&fetcher, &page_url)
                .await
                .map_err(|e| HandlerError::failed(e.to_string()))?;
            Ok(Value::from(icons))
        }))
    }
}

/// `https://<domain>/` for a bare domain.
///
/// Accepts an optional `host:port` but nothing that would change the path,
/// query, credentials or scheme.
pub fn site_url(domain: &str) -> Result<Url, FetchError> {
    let domain = domain.trim();
    let invalid = || FetchError::InvalidDomain(domain.to_string());

    let forbidden = |c: char| matches!(c, '/' | '?' | '#' | '@' | '\\') || c.is_whitespace();
    if domain.is_empty() || domain.contains(forbidden) {
        return Err(invalid());
    }

    let url = Url::parse(&format!("https://{domain}/")).map_err(|_| invalid())?;
    if url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(url)
}

/// `/favicon.ico` on the same origin as `page_url`.
pub fn fallback_icon_url(page_url: &Url) -> String {
    page_url
        .join("/favicon.ico")
        .map(String::from)
        .unwrap_or_else(|_| format!("{}favicon.ico", page_url.as_str()))
}

/// Icon URLs declared by `<link>` tags in `html`, resolved against `base`.
///
/// Order follows the document; repeated URLs are kept once.
pub fn extract_icon_urls(html: &str, base: &Url) -> Vec<String> {
    let mut icons: Vec<String> = Vec::new();

    for tag in LINK_TAG.find_iter(html) {
        let mut rel = None;
        let mut href = None;
        for caps in ATTRIBUTE.captures_iter(tag.as_str()) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or("", |m| m.as_str());
            match caps[1].to_ascii_lowercase().as_str() {
                "rel" => rel = rel.or(Some(value)),
                _ => href = href.or(Some(value)),
            }
        }

        let (Some(rel), Some(href)) = (rel, href) else {
            continue;
        };
        if !is_icon_rel(rel) || href.trim().is_empty() {
            continue;
        }

        if let Ok(resolved) = base.join(href.trim()) {
            let resolved = String::from(resolved);
            if !icons.contains(&resolved) {
                icons.push(resolved);
            }
        }
    }

    icons
}

fn is_icon_rel(rel: &str) -> bool {
    rel.split_ascii_whitespace()
        .any(|token| ICON_RELS.iter().any(|icon| token.eq_ignore_ascii_case(icon)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StaticPageFetcher;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    fn handler(fetcher: StaticPageFetcher) -> FetchIconHandler<StaticPageFetcher> {
        FetchIconHandler::new(Arc::new(fetcher))
    }

    fn request(domain: Value) -> InboundRequest {
        InboundRequest::new("fetch-icon-by-domain").with_field("domain", domain)
    }

    async fn resolve(outcome: HandlerOutcome) -> HandlerResult<Value> {
        match outcome {
            HandlerOutcome::Deferred(fut) => fut.await,
            HandlerOutcome::Ready(v) => Ok(v),
        }
    }

    #[test]
    fn test_extracts_declared_icons() {
        let html = r#"
            <html><head>
              <link rel="stylesheet" href="/style.css">
              <link rel="icon" type="image/png" href="/icons/32.png">
              <LINK REL='shortcut icon' HREF='favicon.ico'>
              <link href="https://cdn.example.com/touch.png" rel="apple-touch-icon" />
              <link rel=icon href=/icons/32.png>
            </head></html>
        "#;

        assert_eq!(
            extract_icon_urls(html, &base()),
            vec![
                "https://example.com/icons/32.png",
                "https://example.com/favicon.ico",
                "https://cdn.example.com/touch.png",
            ]
        );
    }

    #[test]
    fn test_ignores_links_without_href() {
        let html = r#"<link rel="icon"><link rel="icon" href="  ">"#;
        assert!(extract_icon_urls(html, &base()).is_empty());
    }

    #[test]
    fn test_resolves_against_redirected_base() {
        let redirected = Url::parse("https://www.example.com/home/").unwrap();
        let html = r#"<link rel="icon" href="img/icon.svg">"#;
        assert_eq!(
            extract_icon_urls(html, &redirected),
            vec!["https://www.example.com/home/img/icon.svg"]
        );
    }

    #[test]
    fn test_site_url() {
        assert_eq!(assert_ok!(site_url("example.com")).as_str(), "https://example.com/");
        assert_eq!(
            assert_ok!(site_url(" localhost:8080 ")).as_str(),
            "https://localhost:8080/"
        );
        assert_err!(site_url(""));
        assert_err!(site_url("example.com/path"));
        assert_err!(site_url("user@example.com"));
        assert_err!(site_url("exa mple.com"));
    }

    #[test]
    fn test_fallback_icon_url() {
        let url = Url::parse("https://example.com/some/page").unwrap();
        assert_eq!(fallback_icon_url(&url), "https://example.com/favicon.ico");
    }

    #[tokio::test]
    async fn test_handler_returns_declared_icons() {
        let fetcher = StaticPageFetcher::new()
            .with_page(base(), r#"<link rel="icon" href="/a.png"><link rel="icon" href="/b.png">"#);
        let handler = handler(fetcher);

        let outcome = assert_ok!(handler.handle(&request(json!("example.com")), &SenderDescriptor::default()));
        assert!(outcome.is_deferred());
        assert_eq!(
            assert_ok!(resolve(outcome).await),
            json!(["https://example.com/a.png", "https://example.com/b.png"])
        );
    }

    #[tokio::test]
    async fn test_handler_falls_back_to_favicon() {
        let fetcher = StaticPageFetcher::new().with_page(base(), "<html></html>");
        let handler = handler(fetcher);

        let outcome = assert_ok!(handler.handle(&request(json!("example.com")), &SenderDescriptor::default()));
        assert_eq!(
            assert_ok!(resolve(outcome).await),
            json!(["https://example.com/favicon.ico"])
        );
    }

    #[tokio::test]
    async fn test_handler_fetch_failure_rejects() {
        let handler = handler(StaticPageFetcher::new());

        let outcome = assert_ok!(handler.handle(&request(json!("missing.example")), &SenderDescriptor::default()));
        let err = assert_err!(resolve(outcome).await);
        assert_eq!(err.name(), "Error");
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_handler_rejects_bad_payload_synchronously() {
        let handler = handler(StaticPageFetcher::new());
        let sender = SenderDescriptor::default();

        let missing = handler.handle(&InboundRequest::new("fetch-icon-by-domain"), &sender);
        assert!(matches!(missing, Err(HandlerError::InvalidPayload(_))));

        let not_string = handler.handle(&request(json!(42)), &sender);
        assert!(matches!(not_string, Err(HandlerError::InvalidPayload(_))));

        let bad_domain = handler.handle(&request(json!("a/b")), &sender);
        assert!(matches!(bad_domain, Err(HandlerError::InvalidPayload(_))));
    }
}
