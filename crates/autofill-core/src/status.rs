//! Status updates for observers.

use autofill_protocols::TabId;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

/// One human-readable progress or error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub tab_id: Option<TabId>,
    pub text: String,
    /// Set for fatal errors and completion: nothing more follows for the
    /// session.
    pub terminal: bool,
}

/// Fan-out point for [`StatusUpdate`]s. Dropped receivers are tolerated.
#[derive(Debug, Clone)]
pub struct StatusSink {
    tx: mpsc::UnboundedSender<StatusUpdate>,
}

impl StatusSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<StatusUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Progress within a session.
    pub fn progress(&self, tab_id: Option<TabId>, text: impl Into<String>) {
        self.send(tab_id, text.into(), false);
    }

    /// Final message of a session.
    pub fn terminal(&self, tab_id: Option<TabId>, text: impl Into<String>) {
        self.send(tab_id, text.into(), true);
    }

    fn send(&self, tab_id: Option<TabId>, text: String, terminal: bool) {
        let update = StatusUpdate {
            tab_id,
            text,
            terminal,
        };
        if self.tx.send(update).is_err() {
            debug!("No status observer attached");
        }
    }
}
