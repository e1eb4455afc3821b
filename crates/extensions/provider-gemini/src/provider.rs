//! Gemini provider implementation.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::debug;

use autofill_protocols::{
    BackendKind, GenerationRequest, NativeArguments, ParamKind, ProviderError, ToolCall,
    ToolCallProvider, ToolSchema,
};

use crate::client::{BASE_URL, GeminiClient};
use crate::types::*;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite-preview-06-17";

/// Gemini `generateContent` adapter.
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, BASE_URL)
    }

    /// Point the adapter at another endpoint (proxies, tests).
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client: GeminiClient::new(http, base_url),
        }
    }

    fn build_request(&self, request: &GenerationRequest) -> GenerateContentRequest {
        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(vec![GeminiTool {
                function_declarations: request.tools.iter().map(convert_tool).collect(),
            }])
        };
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::text(request.prompt.clone())],
            }],
            tools,
        }
    }
}

impl Default for GeminiProvider {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

/// Declaration with parameter types in Gemini's upper-case vocabulary.
fn convert_tool(tool: &ToolSchema) -> FunctionDeclaration {
    let mut properties = Map::new();
    for param in &tool.params {
        let kind = match param.kind {
            ParamKind::String => "STRING",
            ParamKind::Boolean => "BOOLEAN",
        };
        properties.insert(
            param.name.clone(),
            json!({"type": kind, "description": param.description}),
        );
    }
    FunctionDeclaration {
        name: tool.name.clone(),
        description: tool.description.clone(),
        parameters: json!({
            "type": "OBJECT",
            "properties": properties,
            "required": tool.required_params(),
        }),
    }
}

/// Function calls of the first candidate, in part order.
fn parse_response(response: GenerateContentResponse) -> Vec<ToolCall> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Vec::new();
    };
    debug!("Gemini finish reason: {:?}", candidate.finish_reason);
    candidate
        .content
        .parts
        .into_iter()
        .filter_map(|part| {
            if let Some(text) = &part.text {
                debug!("Gemini response text: {}", text);
            }
            part.function_call
        })
        .map(|call| ToolCall::from_native(&call.name, NativeArguments::Structured(call.args)))
        .collect()
}

/// Render a canonical call as the `functionCall` part Gemini would return.
pub fn to_native(call: &ToolCall) -> Value {
    let part = Part {
        text: None,
        function_call: Some(FunctionCall {
            name: call.tool.wire_name().to_string(),
            args: call.native_arguments(),
        }),
    };
    serde_json::to_value(part).unwrap_or_default()
}

#[async_trait]
impl ToolCallProvider for GeminiProvider {
    fn kind(&self) -> BackendKind {
        BackendKind::Gemini
    }

    fn default_model(&self) -> &str {
        DEFAULT_MODEL
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Vec<ToolCall>, ProviderError> {
        if request.credentials.is_missing() {
            return Err(ProviderError::MissingCredential {
                provider: BackendKind::Gemini,
            });
        }
        let model = request.model_or(DEFAULT_MODEL);
        let body = self.build_request(&request);
        let response = self
            .client
            .generate_content(&request.credentials.api_key, model, &body)
            .await?;
        Ok(parse_response(response))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
