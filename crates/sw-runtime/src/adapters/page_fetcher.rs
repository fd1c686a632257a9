//! # Page Fetcher
//!
//! Outbound port used by the icon handler, with a `reqwest` adapter for
//! production and a static adapter for tests and offline runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use url::Url;

use crate::container::FetchConfig;

/// Page fetch failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// A fetched HTML page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links resolve against it.
    pub url: Url,
    pub body: String,
}

/// Fetches a page body over HTTP.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

/// `reqwest` backed fetcher.
#[derive(Debug, Clone)]
pub struct ReqwestPageFetcher {
    client: reqwest::Client,
}

impl ReqwestPageFetcher {
    /// Build a client with the configured timeout and user agent.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for ReqwestPageFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let request_failed = |e: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(request_failed)?;
        Ok(FetchedPage {
            url: final_url,
            body,
        })
    }
}

/// Fetcher serving canned pages keyed by URL.
///
/// Unknown URLs answer HTTP 404. Pages can carry a final URL different from
/// the requested one to stand in for a redirect.
#[derive(Debug, Default)]
pub struct StaticPageFetcher {
    pages: HashMap<String, FetchedPage>,
    failures: HashMap<String, FetchError>,
    calls: AtomicUsize,
}

impl StaticPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    #[must_use]
    pub fn with_page(self, url: Url, body: impl Into<String>) -> Self {
        let final_url = url.clone();
        self.with_redirect(url, final_url, body)
    }

    /// Serve `body` for `url` as if it had been redirected to `final_url`.
    #[must_use]
    pub fn with_redirect(mut self, url: Url, final_url: Url, body: impl Into<String>) -> Self {
        let page = FetchedPage {
            url: final_url,
            body: body.into(),
        };
        self.pages.insert(url.into(), page);
        self
    }

    /// Fail every request for `url` with `error`.
    #[must_use]
    pub fn with_failure(mut self, url: Url, error: FetchError) -> Self {
        self.failures.insert(url.into(), error);
        self
    }

    /// Requests served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StaticPageFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = url.as_str();
        if let Some(error) = self.failures.get(key) {
            return Err(error.clone());
        }
        self.pages.get(key).cloned().ok_or_else(|| FetchError::Status {
            url: key.to_string(),
            status: 404,
        })
    }
}
