// src/dag/scheduler_step.rs

//! Step-by-step execution result types for the scheduler.

use crate::dag::task_info::LaunchedTask;
use crate::types::TaskId;

/// Structured result of a single scheduler "step".
///
/// The async driver acts on `launched`; tests can step the core by hand and
/// assert on every field.
#[derive(Debug, Default)]
pub struct SchedulerStep {
    /// Tasks moved to `Running` in this step, in launch order.
    pub launched: Vec<LaunchedTask>,
    /// Tasks that were canceled in this step because an ancestor failed or
    /// timed out.
    pub newly_canceled: Vec<TaskId>,
    /// The ready queue is empty and nothing is running.
    pub drained: bool,
    /// Work is still queued, but nothing is running and nothing queued is
    /// eligible: without a new registration no progress is possible.
    pub stalled: bool,
}

impl SchedulerStep {
    /// Ids of the launched tasks, in launch order.
    pub fn launched_ids(&self) -> Vec<TaskId> {
        self.launched.iter().map(|t| t.id).collect()
    }
}
