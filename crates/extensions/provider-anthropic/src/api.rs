//! Anthropic messages API types.
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ApiRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ApiTool>,
}

#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ApiTool {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// Response content block. Only `tool_use` blocks carry actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        #[serde(default)]
        id: String,
        name: String,
        #[serde(default)]
        input: serde_json::Value,
    },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_request_serialization() {
        let request = ApiRequest {
            model: "claude-3-5-haiku-latest".to_string(),
            max_tokens: 4000,
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: "Fill the form".to_string(),
            }],
            tools: vec![],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "claude-3-5-haiku-latest");
        assert_eq!(json["max_tokens"], 4000);
        assert_eq!(json["messages"][0]["content"], "Fill the form");
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_content_block_deserialization() {
        let json = serde_json::json!({
            "content": [
                {"type": "text", "text": "I'll fill the form."},
                {"type": "tool_use", "id": "toolu_1", "name": "fill_text_input",
                 "input": {"selector": "//*[@id='a']", "value": "x"}},
                {"type": "thinking", "thinking": "..."}
            ]
        });

        let response: ApiResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.content.len(), 3);
        assert!(matches!(response.content[0], ContentBlock::Text { .. }));
        assert!(matches!(response.content[2], ContentBlock::Other));
        match &response.content[1] {
            ContentBlock::ToolUse { name, input, .. } => {
                assert_eq!(name, "fill_text_input");
                assert_eq!(input["value"], "x");
            }
            other => panic!("Expected ToolUse, got {:?}", other),
        }
    }

    #[test]
    fn test_response_without_content() {
        let response: ApiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.content.is_empty());
    }
}
