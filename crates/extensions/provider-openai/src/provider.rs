//! OpenAI provider implementation.

use async_trait::async_trait;
use tracing::debug;

use autofill_protocols::{
    BackendKind, GenerationRequest, ProviderError, ToolCall, ToolCallProvider,
};

use crate::api::{ApiRequest, ApiResponse};
use crate::converter::build_request;
use crate::parser::{parse_error, parse_response};

const BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

/// OpenAI chat-completions adapter. Works with any compatible endpoint
/// through [`with_base_url`](Self::with_base_url).
pub struct OpenAIProvider {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn send_request(
        &self,
        api_key: &str,
        api_request: &ApiRequest,
    ) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(api_request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error(status, retry_after, &body));
        }

        Ok(response)
    }
}

impl Default for OpenAIProvider {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[async_trait]
impl ToolCallProvider for OpenAIProvider {
    fn kind(&self) -> BackendKind {
        BackendKind::OpenAi
    }

    fn default_model(&self) -> &str {
        DEFAULT_MODEL
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Vec<ToolCall>, ProviderError> {
        if request.credentials.is_missing() {
            return Err(ProviderError::MissingCredential {
                provider: BackendKind::OpenAi,
            });
        }
        let model = request.model_or(DEFAULT_MODEL);
        debug!("OpenAI generate: model={}", model);

        let api_request = build_request(&request, model);
        let response = self
            .send_request(&request.credentials.api_key, &api_request)
            .await?;
        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        Ok(parse_response(api_response))
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
