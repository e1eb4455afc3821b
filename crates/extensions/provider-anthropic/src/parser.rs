//! Response and error parsing.

use autofill_protocols::{BackendKind, NativeArguments, ProviderError, ToolCall};

use tracing::debug;

use crate::api::ContentBlock;

/// Canonical calls from the `tool_use` blocks, in response order.
pub fn parse_content(content: Vec<ContentBlock>) -> Vec<ToolCall> {
    content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::ToolUse { name, input, .. } => {
                Some(ToolCall::from_native(&name, NativeArguments::Structured(input)))
            }
            ContentBlock::Text { text } => {
                debug!("Anthropic response text: {}", text);
                None
            }
            ContentBlock::Other => None,
        })
        .collect()
}

/// Classify a non-success response.
pub fn parse_error(status: u16, retry_after: Option<String>, body: &str) -> ProviderError {
    if status != 429 {
        return ProviderError::from_api_response(status, body);
    }
    let mut message = "Anthropic API Rate Limit Exceeded. Please try again later.".to_string();
    let retry_delay = retry_after.as_deref().and_then(retry_after_secs);
    if let Some(delay) = &retry_delay {
        message.push_str(&format!(" Recommended wait time: {}.", delay));
    }
    ProviderError::RateLimited {
        provider: BackendKind::Anthropic,
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
