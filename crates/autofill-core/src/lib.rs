//! # Autofill Core
//!
//! Session orchestration for form autofill.
//!
//! ## Components
//!
//! - [`Orchestrator`] - Drives each tab through extraction, generation and execution
//! - [`SessionStore`] - At most one live session per tab
//! - [`ProviderRegistry`] - Tool-calling backends by [`BackendKind`](autofill_protocols::BackendKind)
//! - [`PromptBuilder`] - Renders page context and profile into the model prompt
//! - [`PageTransport`] - Delivery of messages to page contexts

pub mod error;
pub mod orchestrator;
pub mod prompt;
pub mod registry;
pub mod session;
pub mod status;
pub mod transport;

pub use error::RegistryError;
pub use orchestrator::{Orchestrator, STATUS_ANALYZING, STATUS_COMPLETE, STATUS_FILLING};
pub use prompt::{PromptBuilder, describe_field, describe_page};
pub use registry::ProviderRegistry;
pub use session::{Session, SessionPhase, SessionStore};
pub use status::{StatusSink, StatusUpdate};
pub use transport::{ChannelTransport, PageTransport};
