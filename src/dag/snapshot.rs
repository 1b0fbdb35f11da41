// src/dag/snapshot.rs

use std::collections::BTreeMap;
use std::fmt;

use crate::types::{TaskId, TaskStatus};

/// Point-in-time copy of every task's status, ordered by id.
///
/// Owned data: holding a snapshot never blocks the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    statuses: BTreeMap<TaskId, TaskStatus>,
}

impl StatusSnapshot {
    pub fn get(&self, id: TaskId) -> Option<TaskStatus> {
        self.statuses.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TaskId, TaskStatus)> + '_ {
        self.statuses.iter().map(|(id, status)| (*id, *status))
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Number of tasks currently in `status`.
    pub fn count(&self, status: TaskStatus) -> usize {
        self.statuses.values().filter(|s| **s == status).count()
    }

    /// `true` if every task completed successfully.
    pub fn all_completed(&self) -> bool {
        self.statuses.values().all(|s| *s == TaskStatus::Completed)
    }

    pub fn into_map(self) -> BTreeMap<TaskId, TaskStatus> {
        self.statuses
    }
}

impl FromIterator<(TaskId, TaskStatus)> for StatusSnapshot {
    fn from_iter<I: IntoIterator<Item = (TaskId, TaskStatus)>>(iter: I) -> Self {
        Self {
            statuses: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (id, status) in &self.statuses {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{id}={status}")?;
            first = false;
        }
        Ok(())
    }
}
