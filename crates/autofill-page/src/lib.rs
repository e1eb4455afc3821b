//! Page context for the autofill pipeline.
//!
//! Everything that runs "inside the page" lives here:
//!
//! - [`Document`] - owned HTML document with live form state and an event log
//! - [`locator`] - compute and resolve structural [`Locator`](autofill_protocols::Locator)s
//! - [`Extractor`] - ordered, visibility-filtered page context extraction
//! - [`ActionExecutor`] - replays canonical tool calls with per-call isolation
//! - [`PageContext`] - message loop answering the orchestrator
//!
//! There is no layout engine: visibility is decided from the `hidden`
//! attribute, input type and inline styles only.

pub mod dom;
pub mod error;
pub mod executor;
pub mod extractor;
pub mod highlight;
pub mod locator;
pub mod runtime;

pub use dom::{Document, DomEvent, EventKind, NodeData, NodeId};
pub use error::DomError;
pub use executor::ActionExecutor;
pub use extractor::{Extractor, ExtractorConfig};
pub use highlight::{HIGHLIGHT_OUTLINE, HighlightTracker};
pub use runtime::{PageConfig, PageContext};
