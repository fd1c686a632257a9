//! Offscreen document description and host context records.

use serde::{Deserialize, Serialize};

/// Extension-relative path of the offscreen page.
pub const OFFSCREEN_DOCUMENT_PATH: &str = "src/offscreen.html";

/// Default justification shown by the host.
pub const DEFAULT_JUSTIFICATION: &str = "offscreen page";

/// Declared reason for keeping an offscreen document.
///
/// Wire names match the host's `offscreen.Reason` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OffscreenReason {
    Testing,
    AudioPlayback,
    IframeScripting,
    DomScraping,
    Blobs,
    DomParser,
    UserMedia,
    DisplayMedia,
    WebRtc,
    Clipboard,
    LocalStorage,
    Workers,
    BatteryStatus,
    MatchMedia,
    Geolocation,
}

/// Creation parameters forwarded verbatim to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffscreenDocumentConfig {
    /// Extension-relative page path
    pub url: String,
    /// Declared usage reasons (must be non-empty for the host to accept)
    pub reasons: Vec<OffscreenReason>,
    /// Human-readable justification
    pub justification: String,
}

impl Default for OffscreenDocumentConfig {
    fn default() -> Self {
        Self {
            url: OFFSCREEN_DOCUMENT_PATH.to_string(),
            reasons: vec![
                OffscreenReason::Blobs,
                OffscreenReason::Clipboard,
                OffscreenReason::DomScraping,
                OffscreenReason::LocalStorage,
            ],
            justification: DEFAULT_JUSTIFICATION.to_string(),
        }
    }
}

/// Kind of extension context known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContextType {
    Tab,
    Popup,
    Background,
    OffscreenDocument,
    SidePanel,
    DeveloperTools,
}

/// A live context as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionContext {
    pub context_id: String,
    pub context_type: ContextType,
    pub document_url: Option<String>,
}

/// Query filter for `query_existing_instances`.
///
/// Empty lists match everything, as with the host API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextFilter {
    pub context_types: Vec<ContextType>,
    pub document_urls: Vec<String>,
}

impl ContextFilter {
    /// Filter for offscreen documents loaded from `document_url`.
    pub fn offscreen(document_url: impl Into<String>) -> Self {
        Self {
            context_types: vec![ContextType::OffscreenDocument],
            document_urls: vec![document_url.into()],
        }
    }

    /// Whether `context` passes this filter.
    #[must_use]
    pub fn matches(&self, context: &ExtensionContext) -> bool {
        let type_ok =
            self.context_types.is_empty() || self.context_types.contains(&context.context_type);
        let url_ok = self.document_urls.is_empty()
            || context
                .document_url
                .as_ref()
                .is_some_and(|url| self.document_urls.contains(url));
        type_ok && url_ok
    }
}
