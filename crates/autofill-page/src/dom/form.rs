//! Live form-control state.
//!
//! Values start from the markup (`value=`, textarea text, `checked`,
//! `selected`) and diverge once a control is written to, like the dirty
//! flags of a browser.

use super::{Document, NodeId};
use crate::error::DomError;

#[derive(Debug, Clone, Default)]
pub(super) struct FormState {
    value: Option<String>,
    checked: Option<bool>,
    selected: Option<bool>,
}

/// Input types that do not hold user-entered text.
const NON_TEXT_INPUT_TYPES: &[&str] = &[
    "checkbox", "radio", "button", "submit", "reset", "image", "file", "hidden",
];

impl Document {
    /// The control kind: lower-case input `type` (default `text`), or the
    /// tag name for other elements.
    pub fn control_kind(&self, node: NodeId) -> Option<String> {
        let element = self.element(node)?;
        if element.tag() == "input" {
            let kind = element
                .attr("type")
                .map(|t| t.trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "text".to_string());
            Some(kind)
        } else {
            Some(element.tag().to_string())
        }
    }

    pub fn is_form_control(&self, node: NodeId) -> bool {
        matches!(self.tag(node), Some("input" | "textarea" | "select"))
    }

    pub fn is_checkable(&self, node: NodeId) -> bool {
        self.tag(node) == Some("input")
            && matches!(self.control_kind(node).as_deref(), Some("checkbox" | "radio"))
    }

    pub fn is_text_control(&self, node: NodeId) -> bool {
        match self.tag(node) {
            Some("textarea") => true,
            Some("input") => self
                .control_kind(node)
                .is_some_and(|kind| !NON_TEXT_INPUT_TYPES.contains(&kind.as_str())),
            _ => false,
        }
    }

    /// Current value of an input, textarea, select or option.
    pub fn value(&self, node: NodeId) -> Option<String> {
        let element = self.element(node)?;
        if let Some(value) = &element.state.value {
            return Some(value.clone());
        }
        match element.tag() {
            "input" => Some(match element.attr("value") {
                Some(value) => value.to_string(),
                None if self.is_checkable(node) => "on".to_string(),
                None => String::new(),
            }),
            "textarea" => Some(self.text_content(node)),
            "select" => Some(
                self.selected_option(node)
                    .and_then(|o| self.value(o))
                    .unwrap_or_default(),
            ),
            "option" => Some(match element.attr("value") {
                Some(value) => value.to_string(),
                None => collapse_whitespace(&self.text_content(node)),
            }),
            _ => None,
        }
    }

    /// Checked state of a checkbox or radio button.
    pub fn checked(&self, node: NodeId) -> Option<bool> {
        if !self.is_checkable(node) {
            return None;
        }
        let element = self.element(node)?;
        Some(element.state.checked.unwrap_or_else(|| element.has_attr("checked")))
    }

    /// `<option>` elements of a select, including those inside `<optgroup>`.
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.descendants(select)
            .into_iter()
            .filter(|n| self.tag(*n) == Some("option"))
            .collect()
    }

    /// The selected option: the last one marked selected, else the first.
    pub fn selected_option(&self, select: NodeId) -> Option<NodeId> {
        let options = self.options(select);
        options
            .iter()
            .rev()
            .copied()
            .find(|o| self.is_selected(*o))
            .or_else(|| options.first().copied())
    }

    fn is_selected(&self, option: NodeId) -> bool {
        self.element(option)
            .is_some_and(|e| e.state.selected.unwrap_or_else(|| e.has_attr("selected")))
    }

    /// Set the value of a text control.
    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<(), DomError> {
        if !self.is_text_control(node) {
            return Err(self.not_text_control(node));
        }
        if let Some(element) = self.element_mut(node) {
            element.state.value = Some(value.to_string());
        }
        Ok(())
    }

    /// Select the option whose value equals `value`, or failing that the
    /// option whose trimmed display text equals it.
    pub fn select_value(&mut self, select: NodeId, value: &str) -> Result<(), DomError> {
        match self.tag(select) {
            Some("select") => {}
            Some(tag) => return Err(DomError::NotSelect(tag.to_string())),
            None => return Err(DomError::NotAnElement),
        }

        let options = self.options(select);
        let wanted = value.trim();
        let chosen = options
            .iter()
            .copied()
            .find(|o| self.value(*o).as_deref() == Some(value))
            .or_else(|| {
                options
                    .iter()
                    .copied()
                    .find(|o| collapse_whitespace(&self.text_content(*o)) == wanted)
            })
            .ok_or_else(|| DomError::NoSuchOption(value.to_string()))?;

        for option in options {
            if let Some(element) = self.element_mut(option) {
                element.state.selected = Some(option == chosen);
            }
        }
        Ok(())
    }

    /// Set the checked state. Checking a radio unchecks the other radios
    /// with the same name in the same form.
    pub fn set_checked(&mut self, node: NodeId, checked: bool) -> Result<(), DomError> {
        if !self.is_checkable(node) {
            let tag = self.tag(node).ok_or(DomError::NotAnElement)?.to_string();
            let kind = self.control_kind(node).unwrap_or_default();
            return Err(DomError::NotCheckable { tag, kind });
        }

        if checked && self.control_kind(node).as_deref() == Some("radio") {
            for other in self.radio_group(node) {
                if other == node {
                    continue;
                }
                if let Some(element) = self.element_mut(other) {
                    element.state.checked = Some(false);
                }
            }
        }
        if let Some(element) = self.element_mut(node) {
            element.state.checked = Some(checked);
        }
        Ok(())
    }

    /// Radios sharing `radio`'s name and form owner, `radio` included.
    fn radio_group(&self, radio: NodeId) -> Vec<NodeId> {
        let Some(name) = self.attr(radio, "name").filter(|n| !n.is_empty()) else {
            return vec![radio];
        };
        let owner = self.form_owner(radio);
        let scope = owner.unwrap_or_else(|| self.root());
        self.descendants(scope)
            .into_iter()
            .filter(|n| {
                self.control_kind(*n).as_deref() == Some("radio")
                    && self.tag(*n) == Some("input")
                    && self.attr(*n, "name") == Some(name)
                    && self.form_owner(*n) == owner
            })
            .collect()
    }

    /// Closest enclosing `<form>`.
    pub fn form_owner(&self, node: NodeId) -> Option<NodeId> {
        self.ancestors(node).find(|n| self.tag(*n) == Some("form"))
    }

    fn not_text_control(&self, node: NodeId) -> DomError {
        match self.element(node) {
            Some(element) => DomError::NotTextControl {
                tag: element.tag().to_string(),
                kind: self.control_kind(node).unwrap_or_default(),
            },
            None => DomError::NotAnElement,
        }
    }
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
