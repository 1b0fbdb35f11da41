// src/exec/task_runner.rs

//! Runs a single launched task body and reports its outcome.

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error};

use crate::dag::LaunchedTask;
use crate::engine::{RuntimeEvent, TaskOutcome};
use crate::types::TaskId;

/// Spawn a runner for `task` that sends exactly one `TaskCompleted` event
/// back to the runtime.
pub fn spawn_task(
    task: LaunchedTask,
    runtime_tx: mpsc::UnboundedSender<RuntimeEvent>,
    abort_on_timeout: bool,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let id = task.id;
        let outcome = run_task(task, abort_on_timeout).await;

        if runtime_tx
            .send(RuntimeEvent::TaskCompleted { id, outcome })
            .is_err()
        {
            debug!(task = %id, "runtime event channel closed; dropping completion");
        }
    })
}

/// Run a task body to an outcome.
///
/// The body runs as its own Tokio task. With a timeout configured, the body
/// races a timer:
/// - body first: its result decides the outcome;
/// - timer first: the outcome is `TimedOut` and the body is either aborted
///   (`abort_on_timeout`) or left running detached, its result discarded.
///
/// A panicking body counts as a failure.
pub async fn run_task(task: LaunchedTask, abort_on_timeout: bool) -> TaskOutcome {
    let LaunchedTask {
        id, timeout, body, ..
    } = task;

    debug!(task = %id, timeout_ms = timeout.map(|t| t.as_millis() as u64), "starting task body");

    // Invoke the body inside the spawned task so a panic while building the
    // future is caught as well.
    let mut handle = tokio::spawn(async move { body().await });

    let Some(limit) = timeout else {
        return outcome_of(id, handle.await);
    };

    tokio::select! {
        joined = &mut handle => outcome_of(id, joined),

        _ = tokio::time::sleep(limit) => {
            if abort_on_timeout {
                handle.abort();
                debug!(task = %id, "timeout elapsed; aborted task body");
            } else {
                debug!(task = %id, "timeout elapsed; task body left running detached");
            }
            TaskOutcome::TimedOut
        }
    }
}

fn outcome_of(id: TaskId, joined: Result<anyhow::Result<()>, JoinError>) -> TaskOutcome {
    match joined {
        Ok(Ok(())) => TaskOutcome::Success,
        Ok(Err(err)) => TaskOutcome::Failed(format!("{err:#}")),
        Err(err) if err.is_panic() => {
            error!(task = %id, "task body panicked");
            TaskOutcome::Failed("task body panicked".to_string())
        }
        Err(err) => TaskOutcome::Failed(err.to_string()),
    }
}
