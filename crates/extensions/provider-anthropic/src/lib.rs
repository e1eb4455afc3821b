//! Anthropic tool-calling provider for autofill.

mod api;
mod converter;
mod parser;
mod provider;

pub use converter::to_native;
pub use provider::{AnthropicProvider, DEFAULT_MODEL};
