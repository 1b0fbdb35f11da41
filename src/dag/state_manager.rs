// src/dag/state_manager.rs

//! Status transitions that involve more than one task: dependency
//! satisfaction and cascading cancellation.

use tracing::debug;

use crate::dag::graph::DependencyGraph;
use crate::dag::ready_queue::ReadyQueue;
use crate::dag::registry::TaskRegistry;
use crate::types::{TaskId, TaskStatus};

/// Mutable view over the registry and queue used for cancellation.
pub struct StateManager<'a> {
    graph: &'a DependencyGraph,
    registry: &'a mut TaskRegistry,
    queue: &'a mut ReadyQueue,
}

impl<'a> StateManager<'a> {
    pub fn new(
        graph: &'a DependencyGraph,
        registry: &'a mut TaskRegistry,
        queue: &'a mut ReadyQueue,
    ) -> Self {
        Self {
            graph,
            registry,
            queue,
        }
    }

    /// Whether every prerequisite of `id` has completed.
    pub fn deps_satisfied(&self, id: TaskId) -> bool {
        ReadOnlyStateManager::new(self.registry).deps_satisfied(id)
    }

    /// Cancel every transitive dependent of `root` that is still `Pending`.
    ///
    /// Canceled tasks are removed from the ready queue. Dependents that are
    /// running or already terminal are left alone and their own dependents
    /// are not visited through them. Returns the newly canceled ids (the root
    /// itself is never included).
    ///
    /// Each node can go `Pending -> Canceled` only once, so calling this twice
    /// for the same root is a no-op the second time, and dependency cycles
    /// terminate.
    pub fn cancel_dependents(&mut self, root: TaskId) -> Vec<TaskId> {
        let mut stack: Vec<TaskId> = self.graph.dependents_of(root).to_vec();
        let mut newly_canceled = Vec::new();

        while let Some(id) = stack.pop() {
            let Some(record) = self.registry.get_mut(id) else {
                continue;
            };
            if record.status != TaskStatus::Pending {
                continue;
            }

            record.status = TaskStatus::Canceled;
            self.queue.remove(id);
            debug!(task = %id, root = %root, "canceled pending dependent");
            newly_canceled.push(id);

            stack.extend(self.graph.dependents_of(id).iter().copied());
        }

        newly_canceled
    }
}

/// Read-only view for dependency checks.
pub struct ReadOnlyStateManager<'a> {
    registry: &'a TaskRegistry,
}

impl<'a> ReadOnlyStateManager<'a> {
    pub fn new(registry: &'a TaskRegistry) -> Self {
        Self { registry }
    }

    /// `true` iff `id` is registered and each of its prerequisites is
    /// registered and `Completed`. A prerequisite that was never registered
    /// keeps the task blocked.
    pub fn deps_satisfied(&self, id: TaskId) -> bool {
        let Some(record) = self.registry.get(id) else {
            return false;
        };

        record
            .prerequisites
            .iter()
            .all(|&dep| self.registry.status_of(dep) == Some(TaskStatus::Completed))
    }
}
