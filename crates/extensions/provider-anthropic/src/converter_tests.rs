use super::*;
use autofill_protocols::{Credentials, canonical_tools};

use crate::parser::parse_content;

#[test]
fn test_build_request() {
    let request = GenerationRequest::new("prompt text", Credentials::new("k"));
    let api = build_request(&request, "claude-3-5-haiku-latest");
    assert_eq!(api.model, "claude-3-5-haiku-latest");
    assert_eq!(api.max_tokens, 4000);
    assert_eq!(api.messages.len(), 1);
    assert_eq!(api.messages[0].role, "user");
    assert_eq!(api.tools.len(), 3);
}

#[test]
fn test_convert_tools_uses_json_schema() {
    let tools = convert_tools(&canonical_tools());
    let checked = &tools[2];
    assert_eq!(checked.name, "check_radio_or_checkbox");
    assert_eq!(checked.input_schema["type"], "object");
    assert_eq!(checked.input_schema["properties"]["checked"]["type"], "boolean");
    assert_eq!(
        checked.input_schema["required"],
        serde_json::json!(["selector", "checked"])
    );
}

#[test]
fn test_to_native_round_trip() {
    let calls = vec![
        ToolCall::fill_text("//*[@id='email']", "jane@example.com", Some("email".into())),
        ToolCall::select_option("/html/body/form[1]/select[1]", "PT"),
        ToolCall::set_checked("//*[@id='tos']", true),
    ];
    let blocks: Vec<_> = calls
        .iter()
        .map(|c| serde_json::from_value(to_native(c)).unwrap())
        .collect();
    assert_eq!(parse_content(blocks), calls);
}
