//! Backend-agnostic tool descriptors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::types::{FILL_TEXT_TOOL, SELECT_OPTION_TOOL, SET_CHECKED_TOOL};

/// Primitive parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Boolean,
}

impl ParamKind {
    /// JSON Schema type name.
    pub fn json_type(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }
}

/// One named parameter of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

impl ParamSpec {
    pub fn required(name: &str, kind: ParamKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required: true,
        }
    }
}

/// Definition of a tool the model may call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Names of the required parameters, in declaration order.
    pub fn required_params(&self) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Parameters as a standard JSON Schema object.
    pub fn json_schema(&self) -> Value {
        let mut properties = Map::new();
        for param in &self.params {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": param.kind.json_type(),
                    "description": param.description,
                }),
            );
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": self.required_params(),
        })
    }
}

/// The fill-text, select-option and set-checked tools, in that order.
pub fn canonical_tools() -> Vec<ToolSchema> {
    vec![
        ToolSchema::new(
            FILL_TEXT_TOOL,
            "Fills a text input field or textarea with the given value.",
        )
        .with_param(ParamSpec::required(
            "selector",
            ParamKind::String,
            "The XPath selector of the input field.",
        ))
        .with_param(ParamSpec::required(
            "value",
            ParamKind::String,
            "The value to fill into the input field.",
        ))
        .with_param(ParamSpec::required(
            "field_type",
            ParamKind::String,
            "The type of the field (e.g., text, email, password, tel, textarea).",
        )),
        ToolSchema::new(
            SELECT_OPTION_TOOL,
            "Selects an option in a dropdown (select) element.",
        )
        .with_param(ParamSpec::required(
            "selector",
            ParamKind::String,
            "The XPath selector of the select element.",
        ))
        .with_param(ParamSpec::required(
            "value",
            ParamKind::String,
            "The value of the option to select.",
        )),
        ToolSchema::new(
            SET_CHECKED_TOOL,
            "Checks or unchecks a radio button or checkbox.",
        )
        .with_param(ParamSpec::required(
            "selector",
            ParamKind::String,
            "The XPath selector of the radio or checkbox input.",
        ))
        .with_param(ParamSpec::required(
            "checked",
            ParamKind::Boolean,
            "True to check, false to uncheck.",
        )),
    ]
}

#[cfg(test)]
#[path = "definition_tests.rs"]
mod tests;
