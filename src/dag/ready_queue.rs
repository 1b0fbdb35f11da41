// src/dag/ready_queue.rs

use tracing::debug;

use crate::types::{Priority, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    id: TaskId,
    priority: Priority,
}

/// Pending task ids, ordered for launch.
///
/// Ordering:
/// - descending priority;
/// - among equal priorities, insertion order (oldest first).
///
/// Re-inserting an id (e.g. after a priority change) treats it as the newest
/// entry among its equal-priority peers. An id is present at most once.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    entries: Vec<QueueEntry>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Queued ids in launch-consideration order.
    pub fn ids(&self) -> Vec<TaskId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    /// Insert `id` behind every entry whose priority is >= `priority`.
    ///
    /// If `id` is already queued it is moved, not duplicated.
    pub fn enqueue(&mut self, id: TaskId, priority: Priority) {
        self.remove(id);
        let pos = self.entries.partition_point(|e| e.priority >= priority);
        self.entries.insert(pos, QueueEntry { id, priority });
        debug!(task = %id, priority, position = pos, "enqueued task");
    }

    /// Remove and return the first id (in priority order) for which
    /// `is_eligible` holds. Leaves the queue untouched if there is none.
    pub fn dequeue_ready<F>(&mut self, mut is_eligible: F) -> Option<TaskId>
    where
        F: FnMut(TaskId) -> bool,
    {
        let pos = self.entries.iter().position(|e| is_eligible(e.id))?;
        Some(self.entries.remove(pos).id)
    }

    /// Remove `id` if present. Returns whether anything was removed.
    pub fn remove(&mut self, id: TaskId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Re-queue `id` with a new priority. Returns `false` (and does nothing)
    /// if `id` is not queued.
    pub fn change_priority(&mut self, id: TaskId, priority: Priority) -> bool {
        if !self.remove(id) {
            return false;
        }
        self.enqueue(id, priority);
        true
    }
}
