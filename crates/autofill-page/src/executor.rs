//! Replays canonical tool calls against the current document.

use std::time::{Duration, Instant};

use autofill_protocols::{BatchReport, ExecutionOutcome, ToolCall, ToolName, ToolValue};
use tracing::{debug, info, warn};

use crate::dom::{Document, EventKind, NodeId};
use crate::error::DomError;
use crate::highlight::HighlightTracker;
use crate::locator;

/// Applies tool calls one by one. A failing call never stops the batch.
#[derive(Debug, Clone)]
pub struct ActionExecutor {
    highlights: HighlightTracker,
}

impl Default for ActionExecutor {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

impl ActionExecutor {
    pub fn new(highlight: Duration) -> Self {
        Self {
            highlights: HighlightTracker::new(highlight),
        }
    }

    pub fn highlights(&self) -> &HighlightTracker {
        &self.highlights
    }

    /// Apply every call in order, recording one outcome per call.
    pub fn apply(&mut self, doc: &mut Document, calls: Vec<ToolCall>) -> BatchReport {
        let mut report = BatchReport::default();
        for call in calls {
            let outcome = self.apply_one(doc, &call);
            match &outcome {
                ExecutionOutcome::Applied => debug!("Applied {} on {}", call.tool, call.locator),
                other => warn!("Action {} on {} failed: {}", call.tool, call.locator, other),
            }
            report.push(call, outcome);
        }
        info!(
            "Executed {} actions: {} applied, {} failed",
            report.results.len(),
            report.applied(),
            report.failed()
        );
        report
    }

    fn apply_one(&mut self, doc: &mut Document, call: &ToolCall) -> ExecutionOutcome {
        if let Some(reason) = call.value.malformed_reason() {
            return ExecutionOutcome::HandlerThrew(reason.to_string());
        }

        let Some(node) = locator::resolve(doc, &call.locator) else {
            return ExecutionOutcome::LocatorNotFound;
        };

        let result = match &call.tool {
            ToolName::FillText => fill_text(doc, node, &call.value),
            ToolName::SelectOption => select_option(doc, node, &call.value),
            ToolName::SetChecked => set_checked(doc, node, &call.value),
            ToolName::Unknown(_) => return ExecutionOutcome::UnknownTool,
        };

        match result {
            Ok(()) => {
                self.highlights.mark(doc, node, Instant::now());
                ExecutionOutcome::Applied
            }
            Err(e) => ExecutionOutcome::HandlerThrew(e.to_string()),
        }
    }

    /// Clear expired success markers.
    pub fn sweep_highlights(&mut self, doc: &mut Document, now: Instant) -> usize {
        self.highlights.sweep(doc, now)
    }
}

fn fill_text(doc: &mut Document, node: NodeId, value: &ToolValue) -> Result<(), DomError> {
    let text = value
        .as_text()
        .ok_or(DomError::WrongValueKind { expected: "text" })?;
    doc.set_value(node, text)?;
    doc.dispatch(node, EventKind::Input, true);
    doc.dispatch(node, EventKind::Change, true);
    Ok(())
}

fn select_option(doc: &mut Document, node: NodeId, value: &ToolValue) -> Result<(), DomError> {
    let text = value
        .as_text()
        .ok_or(DomError::WrongValueKind { expected: "text" })?;
    doc.select_value(node, text)?;
    doc.dispatch(node, EventKind::Change, true);
    Ok(())
}

fn set_checked(doc: &mut Document, node: NodeId, value: &ToolValue) -> Result<(), DomError> {
    let checked = value
        .as_checked()
        .ok_or(DomError::WrongValueKind { expected: "boolean" })?;
    doc.set_checked(node, checked)?;
    doc.dispatch(node, EventKind::Click, true);
    doc.dispatch(node, EventKind::Change, true);
    Ok(())
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
