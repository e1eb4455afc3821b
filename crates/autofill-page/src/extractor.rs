//! Page context extraction.
//!
//! One pre-order walk from `<body>`. The order counter is bumped for every
//! visited element and text node, emitted or not, so item orders keep gaps
//! that reflect true document position. Skipped subtrees and comments are
//! not counted.

use autofill_protocols::{FormField, PageContextItem, SelectChoice};
use tracing::debug;

use crate::dom::{Document, NodeData, NodeId, collapse_whitespace};
use crate::locator;

/// Elements whose whole subtree is never content.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Ancestors under which text belongs to a control or its label.
const FORM_RELATED_TAGS: &[&str] = &["label", "input", "textarea", "select", "option"];

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Trimmed text must be strictly longer than this many characters.
    pub min_text_len: usize,
    /// Longer text is truncated to this many characters.
    pub max_text_len: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_text_len: 10,
            max_text_len: 2000,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract the page context, sorted by `order`.
    pub fn extract(&self, doc: &Document) -> Vec<PageContextItem> {
        let Some(start) = doc.body().or_else(|| doc.document_element()) else {
            return Vec::new();
        };

        let mut items = Vec::new();
        let mut order: u64 = 0;
        let mut stack = vec![start];

        while let Some(node) = stack.pop() {
            match doc.data(node) {
                NodeData::Comment(_) | NodeData::Document => continue,
                NodeData::Element(element) => {
                    if SKIPPED_TAGS.contains(&element.tag()) || element.has_attr("inert") {
                        continue;
                    }
                }
                NodeData::Text(_) => {}
            }

            let current = order;
            order += 1;

            if let Some(item) = self.visit(doc, node, current) {
                items.push(item);
            }
            stack.extend(doc.children(node).iter().rev().copied());
        }

        debug!("Extracted {} items from {} visited nodes", items.len(), order);
        items
    }

    fn visit(&self, doc: &Document, node: NodeId, order: u64) -> Option<PageContextItem> {
        match doc.data(node) {
            NodeData::Element(_) if doc.is_form_control(node) && doc.is_visible(node) => {
                let field = describe_field(doc, node);
                Some(PageContextItem::FormField {
                    order,
                    locator: field.selector.clone(),
                    field,
                })
            }
            NodeData::Text(text) => {
                let parent = doc.parent_element(node)?;
                if doc.closest(parent, FORM_RELATED_TAGS).is_some() || !doc.is_visible(parent) {
                    return None;
                }
                let content = text.trim();
                if content.chars().count() <= self.config.min_text_len {
                    return None;
                }
                Some(PageContextItem::Text {
                    order,
                    locator: locator::compute(doc, parent),
                    content: truncate_chars(content, self.config.max_text_len),
                })
            }
            _ => None,
        }
    }
}

/// Describe one form control as it currently stands.
pub fn describe_field(doc: &Document, node: NodeId) -> FormField {
    let tag = doc.tag(node).unwrap_or_default().to_string();
    let non_empty = |name: &str| {
        doc.attr(node, name)
            .filter(|v| !v.is_empty())
            .map(String::from)
    };

    let options = if tag == "select" {
        doc.options(node)
            .into_iter()
            .map(|option| SelectChoice {
                text: doc.text_content(option).trim().to_string(),
                value: doc.value(option).unwrap_or_default(),
            })
            .collect()
    } else {
        Vec::new()
    };

    FormField {
        control_kind: doc.control_kind(node).unwrap_or_else(|| tag.clone()),
        id: non_empty("id"),
        name: non_empty("name"),
        label: resolve_label(doc, node),
        placeholder: non_empty("placeholder"),
        current_value: doc.value(node).unwrap_or_default(),
        checked: doc.checked(node),
        options,
        selector: locator::compute(doc, node),
        tag,
    }
}

/// First non-empty of: `label[for=id]`, nearest preceding sibling label,
/// enclosing label, `aria-label`, `aria-labelledby`.
pub fn resolve_label(doc: &Document, node: NodeId) -> Option<String> {
    let label_text = |label: NodeId| {
        Some(collapse_whitespace(&doc.text_content(label))).filter(|t| !t.is_empty())
    };

    let explicit = doc
        .attr(node, "id")
        .filter(|id| !id.is_empty())
        .and_then(|id| {
            doc.descendants(doc.root()).into_iter().find(|n| {
                doc.tag(*n) == Some("label") && doc.attr(*n, "for") == Some(id)
            })
        })
        .and_then(label_text);
    if explicit.is_some() {
        return explicit;
    }

    let sibling = doc
        .preceding_element_siblings(node)
        .into_iter()
        .find(|s| doc.tag(*s) == Some("label"))
        .and_then(label_text);
    if sibling.is_some() {
        return sibling;
    }

    let enclosing = doc
        .ancestors(node)
        .find(|a| doc.tag(*a) == Some("label"))
        .and_then(label_text);
    if enclosing.is_some() {
        return enclosing;
    }

    if let Some(aria) = doc.attr(node, "aria-label").map(str::trim).filter(|a| !a.is_empty()) {
        return Some(aria.to_string());
    }

    let labelled_by = doc.attr(node, "aria-labelledby")?.trim();
    if labelled_by.is_empty() {
        return None;
    }
    let resolved: Vec<String> = labelled_by
        .split_whitespace()
        .filter_map(|id| doc.element_by_id(id))
        .map(|n| collapse_whitespace(&doc.text_content(n)))
        .filter(|t| !t.is_empty())
        .collect();
    if resolved.is_empty() {
        Some(labelled_by.to_string())
    } else {
        Some(resolved.join(" "))
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
