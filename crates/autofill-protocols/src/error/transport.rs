//! Page transport errors.

use thiserror::Error;

use crate::types::TabId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("No page context is connected for tab {0}")]
    UnknownTab(TabId),

    #[error("Page context for tab {0} has disconnected")]
    Closed(TabId),
}
