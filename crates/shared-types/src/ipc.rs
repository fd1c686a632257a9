//! # Inbound Request Types
//!
//! What the host hands the background listener: the request object and a
//! descriptor of the context that sent it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A cross-context request: `{ action, ...payload }`.
///
/// The action name is read from `action`; `message` is accepted for senders
/// that still use the older key. When both are present `action` wins and
/// `message` stays in the payload. A request with neither key has an empty
/// action name and never matches a handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawInboundRequest")]
pub struct InboundRequest {
    /// Action name used for dispatch (exact match).
    pub action: String,

    /// Remaining payload fields, preserved verbatim.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// Wire form before the action key is resolved.
#[derive(Deserialize)]
struct RawInboundRequest {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl From<RawInboundRequest> for InboundRequest {
    fn from(raw: RawInboundRequest) -> Self {
        let RawInboundRequest {
            action,
            message,
            mut payload,
        } = raw;

        let action = match (action, message) {
            (Some(action), Some(message)) => {
                payload.insert("message".to_string(), message);
                action
            }
            (Some(action), None) => action,
            (None, Some(Value::String(message))) => message,
            (None, Some(other)) => {
                payload.insert("message".to_string(), other);
                String::new()
            }
            (None, None) => String::new(),
        };
        Self { action, payload }
    }
}

impl InboundRequest {
    /// Create a request with no payload fields.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            payload: Map::new(),
        }
    }

    /// Builder-style payload field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Look up a payload field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Look up a payload field that must be a string.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}

/// Opaque description of the sending context.
///
/// Field names follow the host's `MessageSender` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SenderDescriptor {
    /// Extension id of the sender.
    pub id: Option<String>,
    /// URL of the page or frame that sent the request.
    pub url: Option<String>,
    /// Origin of the sender.
    pub origin: Option<String>,
    /// Tab the sender lives in, if any.
    pub tab_id: Option<i64>,
    /// Frame within the tab.
    pub frame_id: Option<i64>,
    /// Document identifier assigned by the host.
    pub document_id: Option<String>,
}

impl SenderDescriptor {
    /// Descriptor for a request originating inside the extension itself.
    pub fn extension(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_action_and_payload() {
        let req: InboundRequest = serde_json::from_value(json!({
            "action": "fetch-icon-by-domain",
            "domain": "example.com"
        }))
        .unwrap();

        assert_eq!(req.action, "fetch-icon-by-domain");
        assert_eq!(req.str_field("domain"), Some("example.com"));
        assert!(req.field("action").is_none());
    }

    #[test]
    fn test_message_alias() {
        let req: InboundRequest = serde_json::from_value(json!({
            "message": "fetch-icon-by-domain",
            "domain": "example.com"
        }))
        .unwrap();
        assert_eq!(req.action, "fetch-icon-by-domain");
    }

    #[test]
    fn test_action_wins_over_message() {
        let req: InboundRequest = serde_json::from_value(json!({
            "action": "fetch-icon-by-domain",
            "message": "unknown-action",
            "domain": "example.com"
        }))
        .unwrap();
        assert_eq!(req.action, "fetch-icon-by-domain");
        assert_eq!(req.str_field("message"), Some("unknown-action"));
        assert_eq!(req.str_field("domain"), Some("example.com"));
    }

    #[test]
    fn test_non_string_message_is_payload() {
        let req: InboundRequest =
            serde_json::from_value(json!({ "message": { "text": "hi" } })).unwrap();
        assert!(req.action.is_empty());
        assert_eq!(req.field("message"), Some(&json!({ "text": "hi" })));
    }

    #[test]
    fn test_missing_action_is_empty() {
        let req: InboundRequest = serde_json::from_value(json!({ "domain": "x" })).unwrap();
        assert!(req.action.is_empty());
    }

    #[test]
    fn test_serialize_flattens_payload() {
        let req = InboundRequest::new("fetch-icon-by-domain").with_field("domain", "example.com");
        let wire = serde_json::to_value(&req).unwrap();
        assert_eq!(
            wire,
            json!({ "action": "fetch-icon-by-domain", "domain": "example.com" })
        );
    }

    #[test]
    fn test_sender_camel_case() {
        let sender: SenderDescriptor =
            serde_json::from_value(json!({ "tabId": 7, "frameId": 0 })).unwrap();
        assert_eq!(sender.tab_id, Some(7));
        assert_eq!(sender.frame_id, Some(0));
        assert!(sender.id.is_none());
    }
}
