//! Page errors.

use thiserror::Error;

/// Failure of a DOM operation performed by an action handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("Node is not an element")]
    NotAnElement,

    #[error("<{tag}> (type {kind}) is not a text control")]
    NotTextControl { tag: String, kind: String },

    #[error("<{0}> is not a select control")]
    NotSelect(String),

    #[error("<{tag}> (type {kind}) is not a checkbox or radio button")]
    NotCheckable { tag: String, kind: String },

    #[error("No option matches '{0}'")]
    NoSuchOption(String),

    #[error("Expected a {expected} value")]
    WrongValueKind { expected: &'static str },
}
