//! Generation request type.

use crate::tool::{ToolSchema, canonical_tools};
use crate::types::Credentials;

/// Everything one `generate` call needs.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub tools: Vec<ToolSchema>,
    pub credentials: Credentials,
    /// Empty means the provider's default model.
    pub model: String,
}

impl GenerationRequest {
    /// Request advertising the canonical tools.
    pub fn new(prompt: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            prompt: prompt.into(),
            tools: canonical_tools(),
            credentials,
            model: String::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolSchema>) -> Self {
        self.tools = tools;
        self
    }

    /// The requested model, or `default` when none was named.
    pub fn model_or<'a>(&'a self, default: &'a str) -> &'a str {
        let model = self.model.trim();
        if model.is_empty() { default } else { model }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
