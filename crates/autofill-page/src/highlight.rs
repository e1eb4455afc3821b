//! Transient success markers.

use std::time::{Duration, Instant};

use crate::dom::{Document, NodeId};

/// Inline outline applied to an element after a successful action.
pub const HIGHLIGHT_OUTLINE: &str = "2px solid #4CAF50";

#[derive(Debug, Clone)]
struct Highlight {
    node: NodeId,
    previous_outline: Option<String>,
    deadline: Instant,
}

/// Tracks applied markers until they expire.
///
/// Marking never waits; expired markers are removed by [`sweep`](Self::sweep),
/// which the page runtime calls on a timer.
#[derive(Debug, Clone)]
pub struct HighlightTracker {
    duration: Duration,
    active: Vec<Highlight>,
}

impl HighlightTracker {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            active: Vec::new(),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Outline `node` until `now + duration`. Re-marking an already marked
    /// node only extends its deadline.
    pub fn mark(&mut self, doc: &mut Document, node: NodeId, now: Instant) {
        let deadline = now + self.duration;
        if let Some(existing) = self.active.iter_mut().find(|h| h.node == node) {
            existing.deadline = deadline;
            return;
        }
        let previous_outline = doc.style_property(node, "outline");
        doc.set_style_property(node, "outline", HIGHLIGHT_OUTLINE);
        self.active.push(Highlight {
            node,
            previous_outline,
            deadline,
        });
    }

    /// Restore every marker whose deadline has passed. Returns how many
    /// were cleared.
    pub fn sweep(&mut self, doc: &mut Document, now: Instant) -> usize {
        let (expired, active): (Vec<_>, Vec<_>) =
            self.active.drain(..).partition(|h| h.deadline <= now);
        self.active = active;
        for highlight in &expired {
            match &highlight.previous_outline {
                Some(outline) => doc.set_style_property(highlight.node, "outline", outline),
                None => doc.remove_style_property(highlight.node, "outline"),
            }
        }
        expired.len()
    }

    pub fn is_marked(&self, node: NodeId) -> bool {
        self.active.iter().any(|h| h.node == node)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
