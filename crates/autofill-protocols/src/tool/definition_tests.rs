use super::*;

#[test]
fn test_canonical_tool_names() {
    let names: Vec<String> = canonical_tools().into_iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        vec![
            "fill_text_input",
            "select_dropdown_option",
            "check_radio_or_checkbox"
        ]
    );
}

#[test]
fn test_required_params() {
    let tools = canonical_tools();
    assert_eq!(tools[0].required_params(), vec!["selector", "value", "field_type"]);
    assert_eq!(tools[1].required_params(), vec!["selector", "value"]);
    assert_eq!(tools[2].required_params(), vec!["selector", "checked"]);
}

#[test]
fn test_json_schema_shape() {
    let schema = canonical_tools()[2].json_schema();
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["properties"]["checked"]["type"], "boolean");
    assert_eq!(schema["properties"]["selector"]["type"], "string");
    assert_eq!(schema["required"][1], "checked");
}

#[test]
fn test_optional_param_not_required() {
    let tool = ToolSchema::new("t", "d").with_param(ParamSpec {
        name: "hint".into(),
        kind: ParamKind::String,
        description: "optional".into(),
        required: false,
    });
    assert!(tool.required_params().is_empty());
    assert!(tool.json_schema()["properties"]["hint"].is_object());
}
