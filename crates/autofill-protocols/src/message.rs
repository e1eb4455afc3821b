//! Messages exchanged between the orchestrator, page contexts and observers.

use serde::{Deserialize, Serialize};

use crate::types::{BackendKind, Credentials, PageContextItem, TabId, ToolCall};

/// One message of the autofill protocol, serialized as `{type, payload}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Caller to orchestrator: start a session.
    AutofillRequest(AutofillRequest),
    /// Orchestrator to page: extract the page context.
    ExtractFormData,
    /// Page to orchestrator: extraction result.
    FormDataExtracted(Vec<PageContextItem>),
    /// Orchestrator to page: replay these calls.
    ExecuteActions(Vec<ToolCall>),
    /// Page to orchestrator: the batch finished.
    FillComplete,
    /// Orchestrator to observers: human-readable progress or error.
    UpdateStatus(String),
}

impl Message {
    /// Wire name of the message type.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AutofillRequest(_) => "AUTOFILL_REQUEST",
            Self::ExtractFormData => "EXTRACT_FORM_DATA",
            Self::FormDataExtracted(_) => "FORM_DATA_EXTRACTED",
            Self::ExecuteActions(_) => "EXECUTE_ACTIONS",
            Self::FillComplete => "FILL_COMPLETE",
            Self::UpdateStatus(_) => "UPDATE_STATUS",
        }
    }
}

/// Payload of [`Message::AutofillRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutofillRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_id: Option<TabId>,

    /// Free-form profile text the model fills the form from.
    pub profile: String,

    #[serde(default)]
    pub credentials: Credentials,

    /// Empty selects the backend's default model.
    #[serde(default)]
    pub model: String,

    #[serde(default)]
    pub backend: BackendKind,
}

/// A message together with the tab it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_tab: Option<TabId>,
    pub message: Message,
}

impl Envelope {
    pub fn from_tab(tab: TabId, message: Message) -> Self {
        Self {
            sender_tab: Some(tab),
            message,
        }
    }

    /// A message from a caller that is not a page context.
    pub fn external(message: Message) -> Self {
        Self {
            sender_tab: None,
            message,
        }
    }
}

/// Response to a handled message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        Self {
            success: true,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Locator;

    #[test]
    fn test_unit_message_wire_format() {
        let json = serde_json::to_value(Message::ExtractFormData).unwrap();
        assert_eq!(json["type"], "EXTRACT_FORM_DATA");
        assert!(json.get("payload").is_none());

        let back: Message = serde_json::from_str(r#"{"type":"FILL_COMPLETE"}"#).unwrap();
        assert_eq!(back, Message::FillComplete);
    }

    #[test]
    fn test_request_payload() {
        let json = r#"{
            "type": "AUTOFILL_REQUEST",
            "payload": {"tab_id": 12, "profile": "Jane Doe", "backend": "anthropic"}
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        let Message::AutofillRequest(request) = message else {
            panic!("wrong variant");
        };
        assert_eq!(request.tab_id, Some(TabId(12)));
        assert_eq!(request.backend, BackendKind::Anthropic);
        assert!(request.credentials.is_missing());
        assert!(request.model.is_empty());
    }

    #[test]
    fn test_execute_actions_payload() {
        let message = Message::ExecuteActions(vec![ToolCall::fill_text(
            Locator::by_id("name").unwrap(),
            "Jane",
            None,
        )]);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["type"], "EXECUTE_ACTIONS");
        assert_eq!(json["payload"][0]["tool"], "fill_text_input");
        assert_eq!(message.kind(), "EXECUTE_ACTIONS");
    }

    #[test]
    fn test_ack_constructors() {
        assert!(Ack::ok().success);
        let ack = Ack::failed("No tabId provided.");
        assert!(!ack.success);
        assert_eq!(ack.error.as_deref(), Some("No tabId provided."));
        let json = serde_json::to_value(Ack::ok_with("No fields to fill")).unwrap();
        assert!(json.get("error").is_none());
    }
}
