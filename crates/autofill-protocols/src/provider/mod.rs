//! Tool-calling provider protocol.
//!
//! A provider turns a prompt plus the canonical tool schemas into a list of
//! canonical [`ToolCall`](crate::types::ToolCall)s, hiding its backend's
//! request and response shapes entirely.

mod request;
mod traits;

pub use request::*;
pub use traits::*;
