//! Structural locators.
//!
//! A [`Locator`] is an XPath-compatible string that re-identifies one DOM node
//! at evaluation time. Only the subset of XPath that locators are built from
//! is understood:
//!
//! - `//*[@id='name']` - id anchor, optionally followed by steps
//! - `/html/body/div[2]/input[1]` - absolute path of `tag[n]` steps
//!
//! Locators never encode traversal order or timestamps, so they survive
//! mutations of unrelated nodes.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Locator of the `<html>` element.
pub const ROOT_LOCATOR: &str = "/html";

/// Locator of the `<body>` element.
pub const BODY_LOCATOR: &str = "/html/body";

/// String-encoded path to a DOM node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

/// Failure to parse a locator string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    #[error("Empty locator")]
    Empty,

    #[error("Unsupported locator syntax: {0}")]
    Unsupported(String),

    #[error("Invalid locator step '{step}' in {locator}")]
    InvalidStep { locator: String, step: String },
}

/// Where evaluation of a locator starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorAnchor {
    /// The document node; the first step names the root element.
    Document,
    /// The first element in document order with this id.
    Id(String),
}

/// One `tag[n]` step: the n-th (1-based) child element with that tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorStep {
    pub tag: String,
    pub index: usize,
}

/// Parsed form of a [`Locator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorPath {
    pub anchor: LocatorAnchor,
    pub steps: Vec<LocatorStep>,
}

impl Locator {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Id-based locator, or `None` when the id cannot be quoted as an XPath
    /// string literal (it contains both quote characters) or is empty.
    pub fn by_id(id: &str) -> Option<Self> {
        if id.is_empty() {
            return None;
        }
        xpath_literal(id).map(|literal| Self(format!("//*[@id={}]", literal)))
    }

    pub fn root() -> Self {
        Self(ROOT_LOCATOR.to_string())
    }

    pub fn body() -> Self {
        Self(BODY_LOCATOR.to_string())
    }

    /// Locator of the `index`-th (1-based) `tag` child of this node.
    pub fn child(&self, tag: &str, index: usize) -> Self {
        Self(format!("{}/{}[{}]", self.0, tag, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Parse into anchor and steps.
    pub fn parse(&self) -> Result<LocatorPath, LocatorError> {
        let raw = self.0.trim();
        if raw.is_empty() {
            return Err(LocatorError::Empty);
        }

        let (anchor, rest) = if let Some(after) = raw.strip_prefix("//*[@id=") {
            let (id, rest) = parse_literal(after)
                .ok_or_else(|| LocatorError::Unsupported(raw.to_string()))?;
            let rest = rest
                .strip_prefix(']')
                .ok_or_else(|| LocatorError::Unsupported(raw.to_string()))?;
            (LocatorAnchor::Id(id), rest)
        } else if raw.starts_with('/') && !raw.starts_with("//") {
            (LocatorAnchor::Document, raw)
        } else {
            return Err(LocatorError::Unsupported(raw.to_string()));
        };

        let mut steps = Vec::new();
        if !rest.is_empty() {
            let body = rest
                .strip_prefix('/')
                .ok_or_else(|| LocatorError::Unsupported(raw.to_string()))?;
            for segment in body.split('/') {
                steps.push(parse_step(segment).ok_or_else(|| LocatorError::InvalidStep {
                    locator: raw.to_string(),
                    step: segment.to_string(),
                })?);
            }
        }

        if anchor == LocatorAnchor::Document && steps.is_empty() {
            return Err(LocatorError::Unsupported(raw.to_string()));
        }

        Ok(LocatorPath { anchor, steps })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Locator {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Quote a value as an XPath 1.0 string literal.
pub fn xpath_literal(value: &str) -> Option<String> {
    if !value.contains('\'') {
        Some(format!("'{}'", value))
    } else if !value.contains('"') {
        Some(format!("\"{}\"", value))
    } else {
        None
    }
}

fn parse_literal(input: &str) -> Option<(String, &str)> {
    let quote = input.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let body = &input[1..];
    let end = body.find(quote)?;
    Some((body[..end].to_string(), &body[end + 1..]))
}

fn parse_step(segment: &str) -> Option<LocatorStep> {
    let (tag, index) = match segment.find('[') {
        Some(open) => {
            let index = segment[open + 1..].strip_suffix(']')?.parse::<usize>().ok()?;
            (&segment[..open], index)
        }
        None => (segment, 1),
    };

    let valid_tag = !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':');
    if !valid_tag || index == 0 {
        return None;
    }

    Some(LocatorStep {
        tag: tag.to_ascii_lowercase(),
        index,
    })
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
