//! Canonical tool calls.
//!
//! Every provider adapter normalizes its backend's native function-call shape
//! into [`ToolCall`] through [`ToolCall::from_native`], so argument naming
//! conventions never leak past the adapter.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

use super::Locator;

/// Wire name of the fill-text tool.
pub const FILL_TEXT_TOOL: &str = "fill_text_input";
/// Wire name of the select-option tool.
pub const SELECT_OPTION_TOOL: &str = "select_dropdown_option";
/// Wire name of the set-checked tool.
pub const SET_CHECKED_TOOL: &str = "check_radio_or_checkbox";

/// The closed set of actions the executor knows, plus whatever else a
/// backend asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ToolName {
    FillText,
    SelectOption,
    SetChecked,
    Unknown(String),
}

impl ToolName {
    /// Map a backend-supplied function name onto the canonical set.
    pub fn from_wire(name: &str) -> Self {
        match normalize_key(name).as_str() {
            "filltextinput" | "filltext" => Self::FillText,
            "selectdropdownoption" | "selectoption" => Self::SelectOption,
            "checkradioorcheckbox" | "setchecked" => Self::SetChecked,
            _ => Self::Unknown(name.to_string()),
        }
    }

    pub fn wire_name(&self) -> &str {
        match self {
            Self::FillText => FILL_TEXT_TOOL,
            Self::SelectOption => SELECT_OPTION_TOOL,
            Self::SetChecked => SET_CHECKED_TOOL,
            Self::Unknown(name) => name,
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl From<String> for ToolName {
    fn from(name: String) -> Self {
        Self::from_wire(&name)
    }
}

impl From<ToolName> for String {
    fn from(name: ToolName) -> Self {
        name.wire_name().to_string()
    }
}

/// Argument carried by a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolValue {
    Text(String),
    Checked(bool),
    /// The backend's arguments could not be decoded into this call's shape.
    Malformed { malformed: String },
}

impl ToolValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_checked(&self) -> Option<bool> {
        match self {
            Self::Checked(checked) => Some(*checked),
            _ => None,
        }
    }

    pub fn malformed_reason(&self) -> Option<&str> {
        match self {
            Self::Malformed { malformed } => Some(malformed),
            _ => None,
        }
    }
}

/// Arguments as a backend delivered them.
#[derive(Debug, Clone)]
pub enum NativeArguments {
    /// Already-structured arguments (Gemini `args`, Anthropic `input`).
    Structured(Value),
    /// A JSON document encoded as a string (OpenAI `function.arguments`).
    Encoded(String),
}

/// The normalized action shape shared by all providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: ToolName,
    pub locator: Locator,
    pub value: ToolValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_kind_hint: Option<String>,
}

impl ToolCall {
    pub fn fill_text(
        locator: impl Into<Locator>,
        value: impl Into<String>,
        control_kind_hint: Option<String>,
    ) -> Self {
        Self {
            tool: ToolName::FillText,
            locator: locator.into(),
            value: ToolValue::Text(value.into()),
            control_kind_hint,
        }
    }

    pub fn select_option(locator: impl Into<Locator>, value: impl Into<String>) -> Self {
        Self {
            tool: ToolName::SelectOption,
            locator: locator.into(),
            value: ToolValue::Text(value.into()),
            control_kind_hint: None,
        }
    }

    pub fn set_checked(locator: impl Into<Locator>, checked: bool) -> Self {
        Self {
            tool: ToolName::SetChecked,
            locator: locator.into(),
            value: ToolValue::Checked(checked),
            control_kind_hint: None,
        }
    }

    pub fn malformed(tool: ToolName, locator: Locator, reason: impl Into<String>) -> Self {
        Self {
            tool,
            locator,
            value: ToolValue::Malformed {
                malformed: reason.into(),
            },
            control_kind_hint: None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.value.malformed_reason().is_some()
    }

    /// Normalize one backend function call.
    ///
    /// Never fails: undecodable or incomplete arguments yield a call whose
    /// value is [`ToolValue::Malformed`], so one bad call cannot sink the batch.
    pub fn from_native(name: &str, arguments: NativeArguments) -> Self {
        let tool = ToolName::from_wire(name);

        let value = match arguments {
            NativeArguments::Structured(value) => value,
            NativeArguments::Encoded(raw) => match serde_json::from_str::<Value>(&raw) {
                Ok(value) => value,
                Err(e) => {
                    return Self::malformed(
                        tool,
                        Locator::default(),
                        format!("Invalid JSON arguments for {}: {}", name, e),
                    );
                }
            },
        };

        let Value::Object(raw_args) = value else {
            return Self::malformed(
                tool,
                Locator::default(),
                format!("Arguments for {} are not an object", name),
            );
        };
        let args = NormalizedArgs::new(raw_args);
        let locator = args
            .string(&["selector", "locator", "xpath"])
            .map(Locator::new)
            .unwrap_or_default();

        match tool {
            ToolName::FillText => match args.string(&["value", "text"]) {
                Some(value) => Self::fill_text(
                    locator,
                    value,
                    args.string(&["fieldtype", "controlkindhint", "controlkind", "type"]),
                ),
                None => Self::missing(tool, locator, "value"),
            },
            ToolName::SelectOption => match args.string(&["value", "option"]) {
                Some(value) => Self::select_option(locator, value),
                None => Self::missing(tool, locator, "value"),
            },
            ToolName::SetChecked => match args.flag(&["checked", "value"]) {
                Some(checked) => Self::set_checked(locator, checked),
                None => Self::missing(tool, locator, "checked"),
            },
            ToolName::Unknown(_) => Self {
                value: ToolValue::Text(args.string(&["value"]).unwrap_or_default()),
                tool,
                locator,
                control_kind_hint: None,
            },
        }
    }

    /// Canonical arguments in the snake_case shape the tool schemas declare.
    pub fn native_arguments(&self) -> Value {
        let mut args = Map::new();
        args.insert("selector".into(), json!(self.locator.as_str()));
        match (&self.tool, &self.value) {
            (ToolName::SetChecked, ToolValue::Checked(checked)) => {
                args.insert("checked".into(), json!(checked));
            }
            (_, ToolValue::Text(value)) => {
                args.insert("value".into(), json!(value));
            }
            (_, ToolValue::Checked(checked)) => {
                args.insert("value".into(), json!(checked));
            }
            (_, ToolValue::Malformed { .. }) => {}
        }
        if let Some(hint) = &self.control_kind_hint {
            args.insert("field_type".into(), json!(hint));
        }
        Value::Object(args)
    }

    fn missing(tool: ToolName, locator: Locator, argument: &str) -> Self {
        let reason = format!("Missing required argument '{}' for {}", argument, tool);
        Self::malformed(tool, locator, reason)
    }
}

/// Argument map keyed by case- and separator-insensitive names.
struct NormalizedArgs(Map<String, Value>);

impl NormalizedArgs {
    fn new(raw: Map<String, Value>) -> Self {
        Self(raw.into_iter().map(|(k, v)| (normalize_key(&k), v)).collect())
    }

    fn string(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| match self.0.get(*key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    fn flag(&self, keys: &[&str]) -> Option<bool> {
        keys.iter().find_map(|key| match self.0.get(*key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }
}

fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
