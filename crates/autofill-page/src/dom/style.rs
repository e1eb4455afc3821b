//! Inline styles and visibility.

use super::{Document, NodeId};

/// Parse a `style` attribute into ordered `(property, value)` pairs.
/// Property names are lower-cased; later duplicates win on lookup.
pub fn parse_inline_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some((property, value.to_string()))
        })
        .collect()
}

pub fn render_inline_style(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(p, v)| format!("{}: {};", p, v))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Document {
    /// Value of an inline style property, without any `!important` suffix.
    pub fn style_property(&self, node: NodeId, property: &str) -> Option<String> {
        let style = self.attr(node, "style")?;
        parse_inline_style(style)
            .into_iter()
            .rev()
            .find(|(p, _)| p == property)
            .map(|(_, v)| {
                v.trim_end_matches("!important")
                    .trim()
                    .to_ascii_lowercase()
            })
    }

    pub fn set_style_property(&mut self, node: NodeId, property: &str, value: &str) {
        let mut declarations = self
            .attr(node, "style")
            .map(parse_inline_style)
            .unwrap_or_default();
        declarations.retain(|(p, _)| p != property);
        declarations.push((property.to_string(), value.to_string()));
        self.set_attr(node, "style", &render_inline_style(&declarations));
    }

    pub fn remove_style_property(&mut self, node: NodeId, property: &str) {
        let Some(style) = self.attr(node, "style") else {
            return;
        };
        let mut declarations = parse_inline_style(style);
        declarations.retain(|(p, _)| p != property);
        if declarations.is_empty() {
            self.remove_attr(node, "style");
        } else {
            self.set_attr(node, "style", &render_inline_style(&declarations));
        }
    }

    /// Whether an element would be rendered.
    ///
    /// Hidden when the element or an ancestor has the `hidden` attribute,
    /// `display: none`, zero opacity or a zero inline width/height; when the
    /// nearest `visibility` declaration is `hidden` or `collapse`; or when
    /// it is an `<input type="hidden">`. Non-elements are never visible.
    pub fn is_visible(&self, node: NodeId) -> bool {
        if !self.is_element(node) {
            return false;
        }
        if self.tag(node) == Some("input") && self.control_kind(node).as_deref() == Some("hidden")
        {
            return false;
        }

        let mut visibility_decided = false;
        for current in std::iter::once(node).chain(self.ancestors(node)) {
            if !self.is_element(current) {
                continue;
            }
            if self.has_attr(current, "hidden") {
                return false;
            }
            if self.style_property(current, "display").as_deref() == Some("none") {
                return false;
            }
            if self
                .style_property(current, "opacity")
                .and_then(|o| o.parse::<f64>().ok())
                .is_some_and(|o| o <= 0.0)
            {
                return false;
            }
            if is_zero_length(self.style_property(current, "width"))
                || is_zero_length(self.style_property(current, "height"))
            {
                return false;
            }
            if !visibility_decided {
                if let Some(visibility) = self.style_property(current, "visibility") {
                    if matches!(visibility.as_str(), "hidden" | "collapse") {
                        return false;
                    }
                    visibility_decided = true;
                }
            }
        }
        true
    }
}

fn is_zero_length(value: Option<String>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let number = value.trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
    number.trim().parse::<f64>().is_ok_and(|n| n == 0.0)
}
