//! Synthetic event log.

use serde::Serialize;
use std::fmt;

use super::{Document, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Input,
    Change,
    Click,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::Change => "change",
            Self::Click => "click",
        })
    }
}

/// One dispatched event, as an observer on the page would see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomEvent {
    pub target: NodeId,
    pub kind: EventKind,
    pub bubbles: bool,
}

impl Document {
    /// Dispatch an event at `target`. Events are recorded in dispatch order.
    pub fn dispatch(&mut self, target: NodeId, kind: EventKind, bubbles: bool) {
        self.events.push(DomEvent {
            target,
            kind,
            bubbles,
        });
    }

    pub fn events(&self) -> &[DomEvent] {
        &self.events
    }

    /// Events dispatched at `target`, in order.
    pub fn events_for(&self, target: NodeId) -> Vec<EventKind> {
        self.events
            .iter()
            .filter(|e| e.target == target)
            .map(|e| e.kind)
            .collect()
    }

    /// Drain the event log.
    pub fn take_events(&mut self) -> Vec<DomEvent> {
        std::mem::take(&mut self.events)
    }
}
