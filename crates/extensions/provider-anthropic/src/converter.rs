//! Request conversion.

use autofill_protocols::{GenerationRequest, ToolCall, ToolSchema};

use crate::api::{ApiMessage, ApiRequest, ApiTool, ContentBlock};

pub const MAX_TOKENS: u32 = 4000;

pub fn build_request(request: &GenerationRequest, model: &str) -> ApiRequest {
    ApiRequest {
        model: model.to_string(),
        max_tokens: MAX_TOKENS,
        messages: vec![ApiMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        }],
        tools: convert_tools(&request.tools),
    }
}

pub fn convert_tools(tools: &[ToolSchema]) -> Vec<ApiTool> {
    tools
        .iter()
        .map(|t| ApiTool {
            name: t.name.clone(),
            description: t.description.clone(),
            input_schema: t.json_schema(),
        })
        .collect()
}

/// Render a canonical call as the `tool_use` block Anthropic would return.
pub fn to_native(call: &ToolCall) -> serde_json::Value {
    let block = ContentBlock::ToolUse {
        id: String::new(),
        name: call.tool.wire_name().to_string(),
        input: call.native_arguments(),
    };
    serde_json::to_value(block).unwrap_or_default()
}

#[cfg(test)]
#[path = "converter_tests.rs"]
mod tests;
