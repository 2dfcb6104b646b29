//! Ordered record of every task outcome produced by a run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::types::{ResultTag, TaskOutcome};

/// Outcomes in traversal order, one per visited task.
///
/// Only the run loop appends; callers get read-only access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RunReport {
    outcomes: Vec<TaskOutcome>,
}

impl RunReport {
    pub(crate) fn push(&mut self, outcome: TaskOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[TaskOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcome recorded for `task_id`, if the task was visited.
    pub fn get(&self, task_id: &str) -> Option<&TaskOutcome> {
        self.outcomes.iter().find(|outcome| outcome.task_id == task_id)
    }

    pub fn summary(&self) -> ReportSummary {
        let mut counts = BTreeMap::new();
        for outcome in &self.outcomes {
            *counts.entry(outcome.result).or_insert(0) += 1;
        }
        ReportSummary {
            total: self.outcomes.len(),
            counts,
        }
    }
}

/// Per-result counts for a report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub total: usize,
    pub counts: BTreeMap<ResultTag, usize>,
}

impl ReportSummary {
    pub fn count(&self, result: ResultTag) -> usize {
        self.counts.get(&result).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AttemptedAction;
    use crate::test_support::task;

    #[test]
    fn summary_counts_each_result() {
        let mut report = RunReport::default();
        report.push(TaskOutcome::new(
            &task("a", "FINISHED"),
            AttemptedAction::None,
            ResultTag::AlreadyComplete,
        ));
        report.push(TaskOutcome::new(
            &task("b", "STARTED"),
            AttemptedAction::Claim,
            ResultTag::Claimed,
        ));
        report.push(TaskOutcome::new(
            &task("c", "STARTED"),
            AttemptedAction::Claim,
            ResultTag::Claimed,
        ));

        let summary = report.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(ResultTag::Claimed), 2);
        assert_eq!(summary.count(ResultTag::AlreadyComplete), 1);
        assert_eq!(summary.count(ResultTag::StartFailed), 0);
        assert_eq!(report.get("b").map(|o| o.result), Some(ResultTag::Claimed));
    }
}
