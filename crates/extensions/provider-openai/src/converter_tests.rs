use super::*;
use autofill_protocols::{Credentials, canonical_tools};

use crate::parser::parse_tool_calls;

#[test]
fn test_build_request() {
    let request = GenerationRequest::new("prompt text", Credentials::new("k"));
    let api = build_request(&request, "gpt-4.1-mini");
    let json = serde_json::to_value(&api).unwrap();
    assert_eq!(json["model"], "gpt-4.1-mini");
    assert_eq!(json["tool_choice"], "auto");
    assert_eq!(json["messages"][0]["role"], "user");
    assert_eq!(json["messages"][0]["content"], "prompt text");
    assert_eq!(json["tools"].as_array().unwrap().len(), 3);
}

#[test]
fn test_build_request_without_tools_omits_tool_choice() {
    let request = GenerationRequest::new("prompt text", Credentials::new("k")).with_tools(Vec::new());
    let json = serde_json::to_value(build_request(&request, "gpt-4.1-mini")).unwrap();
    assert!(json.get("tools").is_none());
    assert!(json.get("tool_choice").is_none());
}

#[test]
fn test_convert_tools() {
    let tools = convert_tools(&canonical_tools());
    assert_eq!(tools[0].tool_type, "function");
    assert_eq!(tools[0].function.name, "fill_text_input");
    assert_eq!(
        tools[0].function.parameters["required"],
        serde_json::json!(["selector", "value", "field_type"])
    );
}

#[test]
fn test_to_native_encodes_arguments() {
    let call = CanonicalCall::set_checked("//*[@id='tos']", false);
    let native = to_native(&call);
    assert!(native["function"]["arguments"].is_string());
    assert_eq!(native["type"], "function");
}

#[test]
fn test_to_native_round_trip() {
    let calls = vec![
        CanonicalCall::fill_text("//*[@id='phone']", "+351 912 345 678", Some("tel".into())),
        CanonicalCall::select_option("//*[@id='size']", "M"),
        CanonicalCall::set_checked("/html/body/form[1]/input[3]", true),
    ];
    let native: Vec<ToolCall> = calls
        .iter()
        .map(|c| serde_json::from_value(to_native(c)).unwrap())
        .collect();
    assert_eq!(parse_tool_calls(native), calls);
}
