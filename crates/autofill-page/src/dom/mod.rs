//! Owned HTML document model.
//!
//! Nodes live in an arena indexed by [`NodeId`]. Ids are never reused, so a
//! detached node's id stays valid but unreachable from the root.

mod event;
mod form;
mod style;

pub use event::{DomEvent, EventKind};
pub(crate) use form::collapse_whitespace;
pub use style::{parse_inline_style, render_inline_style};

use scraper::{ElementRef, Html};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Payload of one node.
#[derive(Debug, Clone)]
pub enum NodeData {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
}

/// An element with its attributes and live form state.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    state: form::FormState,
}

impl Element {
    pub fn new<'a>(tag: &str, attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                .collect(),
            state: form::FormState::default(),
        }
    }

    /// Lower-case tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// A parsed page.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    events: Vec<DomEvent>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document with no content.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
            events: Vec::new(),
        }
    }

    /// Parse an HTML page. Parsing is lenient and never fails; the result
    /// always has `<html>`, `<head>` and `<body>` elements.
    pub fn parse_html(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut doc = Self::new();
        let root = doc.root();
        doc.import(root, parsed.root_element());
        doc
    }

    fn import(&mut self, parent: NodeId, element: ElementRef<'_>) {
        let value = element.value();
        let id = self.push(NodeData::Element(Element::new(value.name(), value.attrs())));
        self.append_child(parent, id);

        for child in element.children() {
            match child.value() {
                scraper::Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.import(id, child);
                    }
                }
                scraper::Node::Text(text) => {
                    let text_id = self.push(NodeData::Text(text.to_string()));
                    self.append_child(id, text_id);
                }
                scraper::Node::Comment(comment) => {
                    let comment_id = self.push(NodeData::Comment(comment.to_string()));
                    self.append_child(id, comment_id);
                }
                _ => {}
            }
        }
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The `<html>` element.
    pub fn document_element(&self) -> Option<NodeId> {
        self.child_elements(self.root()).next()
    }

    /// The first `<body>` child of the document element.
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.child_elements(html).find(|c| self.tag(*c) == Some("body"))
    }

    pub fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.0].data
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes.get(node.0)?.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node.0)?.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(Element::tag)
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attr(name)
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_attr(name))
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        let name = name.to_ascii_lowercase();
        match element.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => element.attrs.push((name, value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attrs.retain(|(k, _)| k != name);
        }
    }

    /// Text of a text node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match self.data(node) {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    /// Closest ancestor that is an element.
    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|p| self.is_element(*p))
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn child_elements(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
    }

    /// Element siblings before `node`, nearest first.
    pub fn preceding_element_siblings(&self, node: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.parent(node) else {
            return Vec::new();
        };
        let siblings = self.children(parent);
        let position = siblings.iter().position(|s| *s == node).unwrap_or(0);
        siblings[..position]
            .iter()
            .rev()
            .copied()
            .filter(|s| self.is_element(*s))
            .collect()
    }

    /// Ancestors of `node`, nearest first, excluding `node` itself.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), move |n| self.parent(*n))
    }

    /// Closest ancestor-or-self element whose tag is in `tags`.
    pub fn closest(&self, node: NodeId, tags: &[&str]) -> Option<NodeId> {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .find(|n| self.tag(*n).is_some_and(|t| tags.contains(&t)))
    }

    /// `node` and all its descendants in pre-order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .into_iter()
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// First element in document order whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|n| self.attr(*n, "id") == Some(id))
    }

    /// Number of connected elements carrying this `id`.
    pub fn count_id(&self, id: &str) -> usize {
        self.descendants(self.root())
            .into_iter()
            .filter(|n| self.attr(*n, "id") == Some(id))
            .count()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.push(NodeData::Element(Element::new(tag, attrs.iter().copied())))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `child` immediately before `reference` under the same parent.
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        self.detach(child);
        let siblings = &mut self.nodes[parent.0].children;
        let position = siblings.iter().position(|s| *s == reference).unwrap_or(0);
        siblings.insert(position, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Remove `node` (with its subtree) from its parent.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    /// Replace all children of `node` with one text node.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        for child in self.children(node).to_vec() {
            self.detach(child);
        }
        let text_id = self.create_text(text);
        self.append_child(node, text_id);
    }
}

#[cfg(test)]
#[path = "dom_tests.rs"]
mod tests;
