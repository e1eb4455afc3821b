//! # Autofill Provider - Gemini
//!
//! Google Gemini `generateContent` adapter.

mod client;
mod provider;
mod types;

pub use client::quota_error;
pub use provider::{DEFAULT_MODEL, GeminiProvider, to_native};
pub use types::*;
