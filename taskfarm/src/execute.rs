//! Start→claim execution for a single task.

use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::catalog::TaskNode;
use crate::core::types::{ActionReply, AttemptedAction, RequiredAction, ResultTag, TaskOutcome};
use crate::io::error::GatewayError;
use crate::io::gateway::TaskGateway;

/// Knobs for task execution.
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Pause between an accepted start and the claim that follows it.
    pub claim_delay: Duration,
}

/// Perform `action` for `task` and record what happened.
///
/// Soft refusals from the service become outcomes. Transport failures are
/// returned as errors and must end the run.
pub fn execute_task<G: TaskGateway + ?Sized>(
    gateway: &G,
    task: &TaskNode,
    action: RequiredAction,
    options: &ExecuteOptions,
) -> Result<TaskOutcome, GatewayError> {
    match action {
        RequiredAction::None => Ok(TaskOutcome::new(
            task,
            AttemptedAction::None,
            ResultTag::AlreadyComplete,
        )),
        RequiredAction::Unrecognized => {
            warn!(task_id = %task.id, status = %task.status, "skipping task with unrecognized status");
            Ok(TaskOutcome::new(
                task,
                AttemptedAction::None,
                ResultTag::SkippedUnrecognizedStatus,
            ))
        }
        RequiredAction::ClaimOnly => claim_task(gateway, task, AttemptedAction::Claim),
        RequiredAction::StartThenClaim => match gateway.start(&task.id)? {
            ActionReply::Accepted { title } => {
                debug!(task_id = %task.id, title = %title, "task started");
                if !options.claim_delay.is_zero() {
                    thread::sleep(options.claim_delay);
                }
                claim_task(gateway, task, AttemptedAction::StartThenClaim)
            }
            ActionReply::Rejected { reason } => {
                if task.disclaimer_required {
                    warn!(task_id = %task.id, "start refused; task requires a disclaimer acknowledgement");
                } else {
                    warn!(task_id = %task.id, reason = ?reason, "start refused");
                }
                Ok(
                    TaskOutcome::new(task, AttemptedAction::Start, ResultTag::StartFailed)
                        .with_detail(reason),
                )
            }
        },
    }
}

fn claim_task<G: TaskGateway + ?Sized>(
    gateway: &G,
    task: &TaskNode,
    action: AttemptedAction,
) -> Result<TaskOutcome, GatewayError> {
    match gateway.claim(&task.id)? {
        ActionReply::Accepted { title } => {
            info!(task_id = %task.id, title = %title, "task claimed");
            Ok(TaskOutcome::new(task, action, ResultTag::Claimed))
        }
        ActionReply::Rejected { reason } => {
            warn!(task_id = %task.id, reason = ?reason, "claim refused");
            Ok(TaskOutcome::new(task, action, ResultTag::ClaimFailed).with_detail(reason))
        }
    }
}
