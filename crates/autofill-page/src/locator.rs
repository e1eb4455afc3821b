//! Locator computation and resolution against a [`Document`].

use autofill_protocols::{Locator, LocatorAnchor};
use tracing::debug;

use crate::dom::{Document, NodeId};

/// Compute the locator of `node`.
///
/// Elements with an id unique in the document get the id form. `<html>` and
/// `<body>` have fixed locators. Everything else is the parent's locator
/// plus `/tag[n]`, `n` counting same-tag element siblings up to and
/// including the node. A non-element node is located by its parent element.
pub fn compute(doc: &Document, node: NodeId) -> Locator {
    if !doc.is_element(node) {
        return match doc.parent_element(node) {
            Some(parent) => compute(doc, parent),
            None => Locator::default(),
        };
    }

    if let Some(locator) = unique_id_locator(doc, node) {
        return locator;
    }

    if Some(node) == doc.document_element() {
        return Locator::root();
    }
    if Some(node) == doc.body() {
        return Locator::body();
    }

    let tag = doc.tag(node).unwrap_or_default();
    let index = doc
        .preceding_element_siblings(node)
        .into_iter()
        .filter(|s| doc.tag(*s) == Some(tag))
        .count()
        + 1;

    let base = match doc.parent_element(node) {
        Some(parent) => compute(doc, parent),
        None => Locator::default(),
    };
    base.child(tag, index)
}

fn unique_id_locator(doc: &Document, node: NodeId) -> Option<Locator> {
    let id = doc.attr(node, "id").filter(|id| !id.is_empty())?;
    if doc.count_id(id) != 1 {
        return None;
    }
    Locator::by_id(id)
}

/// Evaluate a locator against the current document, returning the first
/// matching element. Unparseable or dangling locators resolve to `None`.
pub fn resolve(doc: &Document, locator: &Locator) -> Option<NodeId> {
    let path = match locator.parse() {
        Ok(path) => path,
        Err(e) => {
            debug!("Locator {} not evaluable: {}", locator, e);
            return None;
        }
    };

    let mut current = match &path.anchor {
        LocatorAnchor::Document => doc.root(),
        LocatorAnchor::Id(id) => doc.element_by_id(id)?,
    };
    for step in &path.steps {
        current = doc
            .child_elements(current)
            .filter(|c| doc.tag(*c) == Some(step.tag.as_str()))
            .nth(step.index - 1)?;
    }
    Some(current)
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
