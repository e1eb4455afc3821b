//! Request conversion.

use autofill_protocols::{GenerationRequest, ToolCall as CanonicalCall, ToolSchema};

use crate::api::{ApiMessage, ApiRequest, ApiTool, FunctionCall, FunctionDef, ToolCall};

pub fn build_request(request: &GenerationRequest, model: &str) -> ApiRequest {
    let tools = convert_tools(&request.tools);
    let tool_choice = (!tools.is_empty()).then(|| "auto".to_string());
    ApiRequest {
        model: model.to_string(),
        messages: vec![ApiMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        }],
        tools,
        tool_choice,
    }
}

pub fn convert_tools(tools: &[ToolSchema]) -> Vec<ApiTool> {
    tools
        .iter()
        .map(|t| ApiTool {
            tool_type: "function".to_string(),
            function: FunctionDef {
                name: t.name.clone(),
                description: t.description.clone(),
                parameters: t.json_schema(),
            },
        })
        .collect()
}

/// Render a canonical call as the `tool_calls[]` entry OpenAI would return.
pub fn to_native(call: &CanonicalCall) -> serde_json::Value {
    let native = ToolCall {
        id: String::new(),
        call_type: "function".to_string(),
        function: FunctionCall {
            name: call.tool.wire_name().to_string(),
            arguments: call.native_arguments().to_string(),
        },
    };
    serde_json::to_value(native).unwrap_or_default()
}

#[cfg(test)]
#[path = "converter_tests.rs"]
mod tests;
