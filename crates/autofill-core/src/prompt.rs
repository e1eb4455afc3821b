//! Prompt rendering.
//!
//! Wording is not part of any contract; what matters is that every item
//! appears in traversal order with its locator, followed by the profile.

use std::fmt::Write;

use autofill_protocols::{FormField, PageContextItem, ToolSchema, canonical_tools, sort_by_order};

const PREAMBLE: &str = "You are an AI assistant specialized in intelligently filling web forms.\n\
Here is a description of the web page's structure, including text content and form elements, \
ordered by their appearance in the DOM:";

const STRUCTURED_HEADER: &str = "Here is a more structured list of the form elements found on the page, \
including their unique selectors for interaction:";

const PROFILE_HEADER: &str =
    "Here is the user's personal information. Use these details to fill the form:";

const TASK: &str = "Your goal is to fill out this form accurately and completely in a single set of \
actions using the provided user information.";

const CLOSING: &str = "Based on the form elements, the surrounding text context, and user data, \
suggest the action(s) to take using the available tools. Call every tool needed in one response.";

/// Renders page context and profile into the generation prompt.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    tools: Vec<ToolSchema>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self {
            tools: canonical_tools(),
        }
    }

    /// Tool schemas advertised alongside the prompt.
    pub fn tools(&self) -> &[ToolSchema] {
        &self.tools
    }

    pub fn build(&self, items: &[PageContextItem], profile: &str) -> String {
        let mut items = items.to_vec();
        sort_by_order(&mut items);

        let fields: Vec<&FormField> = items.iter().filter_map(|i| i.as_form_field()).collect();
        let structured = serde_json::to_string_pretty(&fields).unwrap_or_else(|_| "[]".to_string());

        let mut prompt = String::new();
        let _ = writeln!(prompt, "{}", PREAMBLE);
        prompt.push_str(&describe_page(&items));
        let _ = writeln!(prompt, "\n{}\n{}\n", STRUCTURED_HEADER, structured);
        let _ = writeln!(prompt, "{}\n{}\n", PROFILE_HEADER, profile.trim());
        let _ = writeln!(prompt, "{}", TASK);
        let _ = writeln!(prompt, "You have the following tools available:");
        for tool in &self.tools {
            let _ = writeln!(prompt, "{}", signature(tool));
        }
        let _ = writeln!(prompt, "\n{}", CLOSING);
        prompt
    }
}

/// One line per text item and one block per form field, in the given order.
pub fn describe_page(items: &[PageContextItem]) -> String {
    let mut out = String::new();
    for item in items {
        match item {
            PageContextItem::Text { content, .. } => {
                let _ = writeln!(out, "Text: \"{}\"", content);
            }
            PageContextItem::FormField { field, .. } => out.push_str(&describe_field(field)),
        }
    }
    out
}

pub fn describe_field(field: &FormField) -> String {
    let mut out = format!("Form Field (Type: {}", field.control_kind);
    let quoted = [
        ("ID", field.id.as_deref()),
        ("Name", field.name.as_deref()),
        ("Label", field.label.as_deref()),
        ("Placeholder", field.placeholder.as_deref()),
        (
            "Current Value",
            Some(field.current_value.as_str()).filter(|v| !v.is_empty()),
        ),
    ];
    for (key, value) in quoted {
        if let Some(value) = value {
            let _ = write!(out, ", {}: \"{}\"", key, value);
        }
    }
    if let Some(checked) = field.checked {
        let _ = write!(out, ", Checked: {}", checked);
    }
    out.push_str(")\n");
    let _ = writeln!(out, "  Selector: {}", field.selector);
    if !field.options.is_empty() {
        let options: Vec<String> = field
            .options
            .iter()
            .map(|o| format!("\"{}\" ({})", o.text, o.value))
            .collect();
        let _ = writeln!(out, "  Options: {}", options.join(", "));
    }
    out.push('\n');
    out
}

/// `function name(param: type, ...)`
fn signature(tool: &ToolSchema) -> String {
    let params: Vec<String> = tool
        .params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.kind.json_type()))
        .collect();
    format!("function {}({})", tool.name, params.join(", "))
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
