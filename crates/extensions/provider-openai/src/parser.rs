//! Response and error parsing.

use autofill_protocols::{BackendKind, NativeArguments, ProviderError, ToolCall as CanonicalCall};

use tracing::debug;

use crate::api::{ApiResponse, ToolCall};

/// Canonical calls of the first choice.
pub fn parse_response(response: ApiResponse) -> Vec<CanonicalCall> {
    let Some(choice) = response.choices.into_iter().next() else {
        return Vec::new();
    };
    if let Some(text) = &choice.message.content {
        debug!("OpenAI response text: {}", text);
    }
    choice
        .message
        .tool_calls
        .map(parse_tool_calls)
        .unwrap_or_default()
}

/// Each call's arguments are decoded on their own, so one undecodable
/// payload only marks that call malformed.
pub fn parse_tool_calls(calls: Vec<ToolCall>) -> Vec<CanonicalCall> {
    calls
        .into_iter()
        .map(|call| {
            CanonicalCall::from_native(
                &call.function.name,
                NativeArguments::Encoded(call.function.arguments),
            )
        })
        .collect()
}

/// Classify a non-success response.
pub fn parse_error(status: u16, retry_after: Option<String>, body: &str) -> ProviderError {
    if status != 429 {
        return ProviderError::from_api_response(status, body);
    }
    let mut message = "OpenAI API Rate Limit Exceeded. Please try again later.".to_string();
    let retry_delay = retry_after.as_deref().and_then(retry_after_secs);
    if let Some(delay) = &retry_delay {
        message.push_str(&format!(" Recommended wait time: {}.", delay));
    }
    ProviderError::RateLimited {
        provider: BackendKind::OpenAi,
        message,
        retry_delay,
        quota_metric: None,
    }
}

/// Delay-seconds form of `retry-after`. The HTTP-date form carries no
/// usable delay and yields `None`.
fn retry_after_secs(value: &str) -> Option<String> {
    value.trim().parse::<u64>().ok().map(|secs| format!("{}s", secs))
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
