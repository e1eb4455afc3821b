//! Per-action execution outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ToolCall;

/// Action-local result of replaying one [`ToolCall`].
///
/// None of these escalate to a session failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Applied,
    LocatorNotFound,
    UnknownTool,
    HandlerThrew(String),
}

impl ExecutionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::LocatorNotFound => f.write_str("locator not found"),
            Self::UnknownTool => f.write_str("unknown tool"),
            Self::HandlerThrew(reason) => write!(f, "handler failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub call: ToolCall,
    pub outcome: ExecutionOutcome,
}

/// Ordered results of one batch, one entry per submitted call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<ExecutionResult>,
}

impl BatchReport {
    pub fn push(&mut self, call: ToolCall, outcome: ExecutionOutcome) {
        self.results.push(ExecutionResult { call, outcome });
    }

    pub fn applied(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_applied()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.applied()
    }

    pub fn outcomes(&self) -> Vec<&ExecutionOutcome> {
        self.results.iter().map(|r| &r.outcome).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_counts() {
        let mut report = BatchReport::default();
        report.push(ToolCall::set_checked("//*[@id='a']", true), ExecutionOutcome::Applied);
        report.push(
            ToolCall::select_option("//*[@id='b']", "x"),
            ExecutionOutcome::LocatorNotFound,
        );
        report.push(
            ToolCall::fill_text("//*[@id='c']", "y", None),
            ExecutionOutcome::HandlerThrew("not a text control".into()),
        );
        assert_eq!(report.applied(), 1);
        assert_eq!(report.failed(), 2);
        assert_eq!(report.outcomes()[1], &ExecutionOutcome::LocatorNotFound);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(ExecutionOutcome::HandlerThrew("boom".into())).unwrap();
        assert_eq!(json["outcome"], "handler_threw");
        assert_eq!(json["reason"], "boom");

        let json = serde_json::to_value(ExecutionOutcome::Applied).unwrap();
        assert_eq!(json["outcome"], "applied");
    }
}
