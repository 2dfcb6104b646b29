//! Orchestration for a full pass over the task catalog.
//!
//! Every task reachable from the catalog is classified and executed exactly
//! once, in traversal order. Soft refusals are recorded and the pass moves
//! on; a transport failure stops the pass where it happened.

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::catalog::Catalog;
use crate::core::classifier::classify;
use crate::core::invariants::validate_catalog;
use crate::core::report::RunReport;
use crate::core::walk::{count_tasks, try_for_each_task};
use crate::execute::{ExecuteOptions, execute_task};
use crate::io::error::GatewayError;
use crate::io::gateway::TaskGateway;

/// A pass over the catalog ended early on a transport failure.
#[derive(Debug, Error)]
#[error("task run aborted at task '{task_id}' after {} completed task(s)", .completed.len())]
pub struct RunAborted {
    /// Task whose remote call failed.
    pub task_id: String,
    /// Outcomes recorded before the failing call.
    pub completed: RunReport,
    #[source]
    pub source: GatewayError,
}

/// Classify and execute every task in `catalog`.
#[instrument(skip_all, fields(tasks = count_tasks(catalog)))]
pub fn run_catalog<G: TaskGateway + ?Sized>(
    gateway: &G,
    catalog: &Catalog,
    options: &ExecuteOptions,
) -> Result<RunReport, RunAborted> {
    for problem in validate_catalog(catalog) {
        warn!(problem = %problem, "catalog invariant violated");
    }

    let mut report = RunReport::default();
    let walked: Result<(), (String, GatewayError)> = try_for_each_task(catalog, |task, depth| {
        let action = classify(&task.status);
        debug!(task_id = %task.id, depth, status = %task.status, action = ?action, "visiting task");
        let outcome = execute_task(gateway, task, action, options)
            .map_err(|source| (task.id.clone(), source))?;
        report.push(outcome);
        Ok(())
    });

    match walked {
        Ok(()) => {
            info!(outcomes = report.len(), "task run complete");
            Ok(report)
        }
        Err((task_id, source)) => Err(RunAborted {
            task_id,
            completed: report,
            source,
        }),
    }
}
