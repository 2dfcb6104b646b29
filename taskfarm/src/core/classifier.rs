//! Deterministic classification of remote task status.

use crate::catalog::TaskStatus;
use crate::core::types::RequiredAction;

/// Map a task's reported status to the action needed to finish it.
///
/// - `FINISHED` needs nothing.
/// - `NOT_STARTED` must be started and then claimed.
/// - `STARTED` and `READY_FOR_CLAIM` only need a claim.
/// - Any other value is unrecognized and must be skipped.
pub fn classify(status: &TaskStatus) -> RequiredAction {
    match status {
        TaskStatus::Finished => RequiredAction::None,
        TaskStatus::NotStarted => RequiredAction::StartThenClaim,
        TaskStatus::Started | TaskStatus::ReadyForClaim => RequiredAction::ClaimOnly,
        TaskStatus::Other(_) => RequiredAction::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_statuses() {
        let cases = [
            ("FINISHED", RequiredAction::None),
            ("NOT_STARTED", RequiredAction::StartThenClaim),
            ("STARTED", RequiredAction::ClaimOnly),
            ("READY_FOR_CLAIM", RequiredAction::ClaimOnly),
        ];
        for (raw, expected) in cases {
            assert_eq!(classify(&TaskStatus::from(raw)), expected, "status {raw}");
        }
    }

    #[test]
    fn classify_other_strings_as_unrecognized() {
        for raw in ["", "finished", "VERIFY", "IN_PROGRESS", "READY_FOR_VERIFY"] {
            assert_eq!(
                classify(&TaskStatus::from(raw)),
                RequiredAction::Unrecognized,
                "status {raw:?}"
            );
        }
    }
}
