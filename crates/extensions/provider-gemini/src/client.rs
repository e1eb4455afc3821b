//! Gemini API client.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use autofill_protocols::{BackendKind, ProviderError};

use crate::types::*;

pub(crate) const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const RETRY_INFO_TYPE: &str = "type.googleapis.com/google.rpc.RetryInfo";

/// Gemini API client.
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Generate content (non-streaming).
    pub async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        debug!("Gemini generate_content: model={}", model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if status.as_u16() == 429 {
            return Err(quota_error(&body));
        }
        if !status.is_success() {
            return Err(ProviderError::from_api_response(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

/// Build the user-facing error for a 429 response body.
///
/// Reads the retry delay from the `RetryInfo` detail and the quota metric
/// from the first quota violation. An unparsable body still yields a
/// rate-limit error.
pub fn quota_error(body: &str) -> ProviderError {
    let parsed = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to parse Gemini 429 error response: {}", e);
            return rate_limited(
                "Gemini API Quota Exceeded (429). Could not determine retry time.".to_string(),
                None,
                None,
            );
        }
    };

    let details = parsed
        .pointer("/error/details")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let retry_delay = details
        .iter()
        .find(|d| d.get("@type").and_then(Value::as_str) == Some(RETRY_INFO_TYPE))
        .and_then(|d| d.get("retryDelay"))
        .and_then(Value::as_str)
        .map(String::from);

    let quota_metric = details
        .iter()
        .filter_map(|d| d.get("violations").and_then(Value::as_array))
        .flatten()
        .find_map(|v| v.get("quotaMetric").and_then(Value::as_str))
        .map(String::from);

    let mut message = match &quota_metric {
        Some(metric) => format!(
            "Gemini API Quota Exceeded. Please try again later or check your Google Cloud project's billing and quota limits. Quota metric: {}.",
            metric
        ),
        None => "Gemini API Quota Exceeded (429).".to_string(),
    };
    if let Some(delay) = &retry_delay {
        message.push_str(&format!(" Recommended wait time: {}.", delay));
    }

    rate_limited(message, retry_delay, quota_metric)
}

fn rate_limited(
    message: String,
    retry_delay: Option<String>,
    quota_metric: Option<String>,
) -> ProviderError {
    ProviderError::RateLimited {
        provider: BackendKind::Gemini,
        message,
        retry_delay,
        quota_metric,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn quota_body(with_metric: bool, with_delay: bool) -> String {
        let mut details = Vec::new();
        if with_metric {
            details.push(json!({
                "@type": "type.googleapis.com/google.rpc.QuotaFailure",
                "violations": [{
                    "quotaMetric": "generativelanguage.googleapis.com/generate_content_free_tier_requests",
                    "quotaId": "GenerateRequestsPerMinutePerProjectPerModel-FreeTier"
                }]
            }));
        }
        if with_delay {
            details.push(json!({
                "@type": "type.googleapis.com/google.rpc.RetryInfo",
                "retryDelay": "27s"
            }));
        }
        json!({
            "error": {
                "code": 429,
                "message": "You exceeded your current quota",
                "status": "RESOURCE_EXHAUSTED",
                "details": details
            }
        })
        .to_string()
    }

    #[test]
    fn test_quota_error_with_metric_and_delay() {
        match quota_error(&quota_body(true, true)) {
            ProviderError::RateLimited {
                message,
                retry_delay,
                quota_metric,
                ..
            } => {
                assert_eq!(
                    message,
                    "Gemini API Quota Exceeded. Please try again later or check your Google Cloud \
                     project's billing and quota limits. Quota metric: \
                     generativelanguage.googleapis.com/generate_content_free_tier_requests. \
                     Recommended wait time: 27s."
                );
                assert_eq!(retry_delay.as_deref(), Some("27s"));
                assert!(quota_metric.is_some());
            }
            other => panic!("Expected RateLimited, got {:?}", other),
        }
    }

    #[test]
    fn test_quota_error_delay_only() {
        let err = quota_error(&quota_body(false, true));
        assert_eq!(
            err.to_string(),
            "Gemini API Quota Exceeded (429). Recommended wait time: 27s."
        );
    }

    #[test]
    fn test_quota_error_no_details() {
        let err = quota_error(&quota_body(false, false));
        assert_eq!(err.to_string(), "Gemini API Quota Exceeded (429).");
    }

    #[test]
    fn test_quota_error_unparsable_body() {
        let err = quota_error("<html>Too Many Requests</html>");
        assert_eq!(
            err.to_string(),
            "Gemini API Quota Exceeded (429). Could not determine retry time."
        );
        assert!(err.is_rate_limited());
    }
}
