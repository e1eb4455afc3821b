//! # Autofill Protocols
//!
//! Canonical definitions shared by every stage of the autofill pipeline.
//! Contains only data types and interface definitions - no I/O.
//!
//! ## Core Types
//!
//! - [`Locator`] - Re-evaluable structural path to a DOM node
//! - [`PageContextItem`] - One extracted text fragment or form field
//! - [`ToolCall`] - The single normalized action shape every provider produces
//! - [`ExecutionResult`] - Per-action outcome of replaying a [`ToolCall`]
//! - [`Message`] - Envelope exchanged between the orchestrator and page contexts
//! - [`ToolCallProvider`] - Trait implemented once per LLM backend

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;
pub mod types;

pub use error::{AutofillError, ProviderError, TransportError};
pub use message::{Ack, AutofillRequest, Envelope, Message};
pub use provider::{GenerationRequest, ToolCallProvider};
pub use tool::{ParamKind, ParamSpec, ToolSchema, canonical_tools};
pub use types::*;
