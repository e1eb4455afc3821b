//! Provider adapter errors.

use thiserror::Error;

use crate::types::BackendKind;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{} API Key is missing. Please set it in the popup.", provider.display_name())]
    MissingCredential { provider: BackendKind },

    /// Backend-reported quota or rate-limit condition (HTTP 429).
    ///
    /// `message` is the complete user-facing text, already carrying whatever
    /// retry hint or quota metric the backend supplied.
    #[error("{message}")]
    RateLimited {
        provider: BackendKind,
        message: String,
        retry_delay: Option<String>,
        quota_metric: Option<String>,
    },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Build an [`ProviderError::Api`] from a non-success response body,
    /// preferring the backend's `error.message` over the raw body.
    pub fn from_api_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body.to_string()
                }
            });
        Self::Api { status, message }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
