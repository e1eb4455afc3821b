use super::*;
use autofill_protocols::{ToolName, ToolValue};
use serde_json::json;

#[test]
fn test_parse_content_skips_text_blocks() {
    let content = vec![
        ContentBlock::Text {
            text: "Filling the form".into(),
        },
        ContentBlock::ToolUse {
            id: "toolu_1".into(),
            name: "check_radio_or_checkbox".into(),
            input: json!({"selector": "//*[@id='tos']", "checked": true}),
        },
        ContentBlock::Other,
    ];
    let calls = parse_content(content);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tool, ToolName::SetChecked);
    assert_eq!(calls[0].value, ToolValue::Checked(true));
}

#[test]
fn test_parse_content_keeps_malformed_calls() {
    let content = vec![ContentBlock::ToolUse {
        id: "toolu_2".into(),
        name: "fill_text_input".into(),
        input: json!({"selector": "//*[@id='a']"}),
    }];
    let calls = parse_content(content);
    assert!(calls[0].is_malformed());
}

#[test]
fn test_rate_limit_with_retry_after() {
    let err = parse_error(429, Some("30".into()), "{}");
    assert_eq!(
        err.to_string(),
        "Anthropic API Rate Limit Exceeded. Please try again later. Recommended wait time: 30s."
    );
    assert!(err.is_rate_limited());
}

#[test]
fn test_rate_limit_without_retry_after() {
    let err = parse_error(429, None, "");
    assert_eq!(
        err.to_string(),
        "Anthropic API Rate Limit Exceeded. Please try again later."
    );
}

#[test]
fn test_rate_limit_ignores_http_date_retry_after() {
    let err = parse_error(429, Some(" Wed, 21 Oct 2026 07:28:00 GMT ".into()), "");
    assert_eq!(
        err.to_string(),
        "Anthropic API Rate Limit Exceeded. Please try again later."
    );
    assert!(err.is_rate_limited());
}

#[test]
fn test_rate_limit_trims_retry_after_seconds() {
    let err = parse_error(429, Some(" 12 ".into()), "");
    assert!(err.to_string().ends_with("Recommended wait time: 12s."));
}

#[test]
fn test_other_error_uses_body_message() {
    let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
    match parse_error(529, None, body) {
        ProviderError::Api { status, message } => {
            assert_eq!(status, 529);
            assert_eq!(message, "Overloaded");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}
