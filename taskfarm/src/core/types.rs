//! Shared deterministic types for the task engine.
//!
//! These types define stable contracts between the classifier, the executor
//! and the run report. They carry no I/O handles.

use serde::Serialize;

use crate::catalog::TaskNode;

/// Local action required to move a task forward, derived from its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequiredAction {
    None,
    StartThenClaim,
    ClaimOnly,
    Unrecognized,
}

/// Remote calls actually issued for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttemptedAction {
    None,
    Start,
    Claim,
    StartThenClaim,
}

/// Final fate of a task within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultTag {
    AlreadyComplete,
    Claimed,
    StartFailed,
    ClaimFailed,
    SkippedUnrecognizedStatus,
}

impl ResultTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultTag::AlreadyComplete => "already-complete",
            ResultTag::Claimed => "claimed",
            ResultTag::StartFailed => "start-failed",
            ResultTag::ClaimFailed => "claim-failed",
            ResultTag::SkippedUnrecognizedStatus => "skipped-unrecognized-status",
        }
    }
}

/// Reply to a start or claim request.
///
/// The service answers both with the task record; an empty title means the
/// request was accepted on the wire but the task was not actually moved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionReply {
    Accepted { title: String },
    Rejected { reason: Option<String> },
}

impl ActionReply {
    /// Build a reply from an optional title; a missing or empty title counts as
    /// rejection. Any non-empty title, even whitespace, is acceptance.
    pub fn from_title(title: Option<String>, reason: Option<String>) -> Self {
        match title {
            Some(title) if !title.is_empty() => ActionReply::Accepted { title },
            _ => ActionReply::Rejected { reason },
        }
    }
}

/// Per-task result recorded in the run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutcome {
    pub task_id: String,
    pub title: String,
    pub action: AttemptedAction,
    pub result: ResultTag,
    /// Message the service attached to a rejection, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl TaskOutcome {
    pub fn new(task: &TaskNode, action: AttemptedAction, result: ResultTag) -> Self {
        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            action,
            result,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_missing_title_is_rejection() {
        assert_eq!(
            ActionReply::from_title(Some(String::new()), None),
            ActionReply::Rejected { reason: None }
        );
        assert_eq!(
            ActionReply::from_title(None, Some("Task is not done".to_string())),
            ActionReply::Rejected {
                reason: Some("Task is not done".to_string())
            }
        );
    }

    #[test]
    fn whitespace_title_is_acceptance() {
        assert_eq!(
            ActionReply::from_title(Some(" ".to_string()), None),
            ActionReply::Accepted {
                title: " ".to_string()
            }
        );
    }

    #[test]
    fn result_tags_serialize_kebab_case() {
        let value = serde_json::to_value(ResultTag::SkippedUnrecognizedStatus).expect("encode");
        assert_eq!(value, serde_json::json!(ResultTag::SkippedUnrecognizedStatus.as_str()));
        let value = serde_json::to_value(AttemptedAction::StartThenClaim).expect("encode");
        assert_eq!(value, serde_json::json!("start-then-claim"));
    }
}
