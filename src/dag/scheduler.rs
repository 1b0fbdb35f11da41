use std::time::Duration;

use tracing::{debug, info, warn};

use crate::dag::graph::DependencyGraph;
use crate::dag::ready_queue::ReadyQueue;
use crate::dag::registry::TaskRegistry;
use crate::dag::scheduler_step::SchedulerStep;
use crate::dag::snapshot::StatusSnapshot;
use crate::dag::state_manager::{ReadOnlyStateManager, StateManager};
use crate::dag::task_info::{LaunchedTask, TaskBody, TaskRecord};
use crate::engine::TaskOutcome;
use crate::errors::{Result, TaskmillError};
use crate::types::{Priority, TaskId, TaskStatus};

/// Synchronous scheduling core.
///
/// Owns the task registry, the dependency graph, the ready queue and the
/// running counter, and decides what to launch next. It never runs task
/// bodies itself: launches are handed back as [`LaunchedTask`]s and
/// completions are fed in through [`Scheduler::step_completion`]. This keeps
/// the whole algorithm testable without an async runtime.
#[derive(Debug)]
pub struct Scheduler {
    registry: TaskRegistry,
    graph: DependencyGraph,
    queue: ReadyQueue,
    /// Number of tasks currently in `Running`.
    running: usize,
    /// Maximum number of tasks allowed in `Running` at once (>= 1).
    concurrency: usize,
}

impl Scheduler {
    /// Create an empty scheduler. A limit of 0 is clamped to 1.
    pub fn new(concurrency: usize) -> Self {
        if concurrency == 0 {
            warn!("concurrency limit of 0 requested; clamping to 1");
        }
        Self {
            registry: TaskRegistry::new(),
            graph: DependencyGraph::new(),
            queue: ReadyQueue::new(),
            running: 0,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn running_count(&self) -> usize {
        self.running
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Ids still waiting in the ready queue, in launch-consideration order.
    pub fn queued_ids(&self) -> Vec<TaskId> {
        self.queue.ids()
    }

    pub fn status_of(&self, id: TaskId) -> Option<TaskStatus> {
        self.registry.status_of(id)
    }

    pub fn priority_of(&self, id: TaskId) -> Option<Priority> {
        self.registry.get(id).map(|r| r.priority)
    }

    pub fn prerequisites_of(&self, id: TaskId) -> &[TaskId] {
        self.graph.prerequisites_of(id)
    }

    pub fn dependents_of(&self, id: TaskId) -> &[TaskId] {
        self.graph.dependents_of(id)
    }

    /// Whether all prerequisites of `id` have completed.
    ///
    /// Returns `None` if the task is unknown.
    pub fn deps_satisfied(&self, id: TaskId) -> Option<bool> {
        if !self.registry.contains(id) {
            return None;
        }
        Some(ReadOnlyStateManager::new(&self.registry).deps_satisfied(id))
    }

    /// Nothing queued and nothing running.
    pub fn is_drained(&self) -> bool {
        self.queue.is_empty() && self.running == 0
    }

    /// Register a task and queue it as `Pending`.
    ///
    /// Prerequisite ids are not validated: an id that is never registered
    /// keeps this task blocked.
    pub fn register(
        &mut self,
        body: TaskBody,
        priority: Priority,
        prerequisites: &[TaskId],
        timeout: Option<Duration>,
    ) -> TaskId {
        let id = self.registry.next_id();
        let deps = self.graph.add_task(id, prerequisites);

        debug!(
            task = %id,
            priority,
            prerequisites = ?deps,
            timeout_ms = timeout.map(|t| t.as_millis() as u64),
            "registered task"
        );

        self.registry
            .insert(TaskRecord::new(id, body, priority, deps, timeout));
        self.queue.enqueue(id, priority);
        id
    }

    /// Replace the priority of a pending task and re-queue it.
    ///
    /// The task is placed behind every queued task of equal priority. Tasks
    /// that are running or finished are left untouched.
    pub fn change_priority(&mut self, id: TaskId, priority: Priority) -> Result<()> {
        let record = self
            .registry
            .get_mut(id)
            .ok_or(TaskmillError::TaskNotFound(id))?;

        if record.status != TaskStatus::Pending {
            debug!(
                task = %id,
                status = %record.status,
                "priority change for non-pending task; ignoring"
            );
            return Ok(());
        }

        let old = record.priority;
        record.priority = priority;
        self.queue.change_priority(id, priority);
        debug!(task = %id, old, new = priority, "changed task priority");
        Ok(())
    }

    /// Launch as many eligible tasks as capacity allows.
    pub fn step_launch(&mut self) -> SchedulerStep {
        let launched = self.launch_ready();
        self.finish_step(launched, Vec::new())
    }

    /// Record the outcome of a running task, cascade cancellation on
    /// failure/timeout, then launch whatever became eligible.
    ///
    /// Completions for unknown tasks, or for tasks that are not running, are
    /// ignored.
    pub fn step_completion(&mut self, id: TaskId, outcome: TaskOutcome) -> SchedulerStep {
        let newly_canceled = self.apply_outcome(id, outcome);
        let launched = self.launch_ready();
        self.finish_step(launched, newly_canceled)
    }

    /// Cancel every pending transitive dependent of `root`.
    pub fn cancel_dependents(&mut self, root: TaskId) -> Vec<TaskId> {
        let canceled =
            StateManager::new(&self.graph, &mut self.registry, &mut self.queue)
                .cancel_dependents(root);

        if !canceled.is_empty() {
            info!(
                root = %root,
                canceled = ?canceled,
                "canceled dependents of unsuccessful task"
            );
        }
        canceled
    }

    /// Copy of every task's current status.
    pub fn snapshot(&self) -> StatusSnapshot {
        self.registry.iter().map(|r| (r.id, r.status)).collect()
    }

    fn apply_outcome(&mut self, id: TaskId, outcome: TaskOutcome) -> Vec<TaskId> {
        let Some(record) = self.registry.get_mut(id) else {
            warn!(task = %id, "completion for unknown task; ignoring");
            return Vec::new();
        };

        if record.status != TaskStatus::Running {
            warn!(
                task = %id,
                status = %record.status,
                "completion for task that is not running; ignoring"
            );
            return Vec::new();
        }

        record.status = match &outcome {
            TaskOutcome::Success => {
                info!(task = %id, "task completed");
                TaskStatus::Completed
            }
            TaskOutcome::Failed(error) => {
                warn!(task = %id, error = %error, "task failed; canceling dependents");
                TaskStatus::Failed
            }
            TaskOutcome::TimedOut => {
                warn!(
                    task = %id,
                    timeout_ms = record.timeout.map(|t| t.as_millis() as u64),
                    "task timed out; canceling dependents"
                );
                TaskStatus::Timeout
            }
        };
        let cascades = record.status.cascades();

        let canceled = if cascades {
            self.cancel_dependents(id)
        } else {
            Vec::new()
        };

        self.running = self.running.saturating_sub(1);
        canceled
    }

    /// Pull eligible tasks off the queue while capacity remains.
    fn launch_ready(&mut self) -> Vec<LaunchedTask> {
        let mut launched = Vec::new();

        while self.running < self.concurrency {
            let ready = {
                let view = ReadOnlyStateManager::new(&self.registry);
                self.queue.dequeue_ready(|id| view.deps_satisfied(id))
            };
            let Some(id) = ready else {
                break;
            };

            let Some(record) = self.registry.get_mut(id) else {
                warn!(task = %id, "queued task missing from registry; dropping");
                continue;
            };
            let Some(body) = record.take_body() else {
                warn!(task = %id, "queued task has no body left; dropping");
                continue;
            };

            record.status = TaskStatus::Running;
            self.running += 1;

            info!(
                task = %id,
                priority = record.priority,
                running = self.running,
                limit = self.concurrency,
                "launching task"
            );

            launched.push(LaunchedTask {
                id,
                priority: record.priority,
                timeout: record.timeout,
                body,
            });
        }

        launched
    }

    fn finish_step(
        &self,
        launched: Vec<LaunchedTask>,
        newly_canceled: Vec<TaskId>,
    ) -> SchedulerStep {
        let drained = self.is_drained();
        let stalled = !self.queue.is_empty() && self.running == 0;

        if stalled {
            debug!(
                queued = ?self.queue.ids(),
                "no queued task is eligible and nothing is running"
            );
        }

        SchedulerStep {
            launched,
            newly_canceled,
            drained,
            stalled,
        }
    }
}
