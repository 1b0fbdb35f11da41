// src/dag/graph.rs

use std::collections::HashMap;

use crate::types::TaskId;

/// Dependency edges between tasks, keyed by id.
///
/// Edges are only ever added (at registration time). Prerequisite ids do not
/// have to be registered yet: the reverse edge is stored anyway and becomes
/// meaningful once a task with that id exists.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// task -> tasks it waits for.
    prerequisites: HashMap<TaskId, Vec<TaskId>>,
    /// task -> tasks that wait for it.
    dependents: HashMap<TaskId, Vec<TaskId>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the edges for a freshly registered task.
    ///
    /// Duplicate prerequisite ids collapse into a single edge. Returns the
    /// deduplicated prerequisite list.
    pub fn add_task(&mut self, id: TaskId, prerequisites: &[TaskId]) -> Vec<TaskId> {
        let mut deps: Vec<TaskId> = Vec::with_capacity(prerequisites.len());
        for &dep in prerequisites {
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }

        for &dep in &deps {
            self.dependents.entry(dep).or_default().push(id);
        }
        self.prerequisites.insert(id, deps.clone());

        deps
    }

    /// Immediate prerequisites of a task.
    pub fn prerequisites_of(&self, id: TaskId) -> &[TaskId] {
        self.prerequisites
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a task (tasks listing it as a prerequisite).
    pub fn dependents_of(&self, id: TaskId) -> &[TaskId] {
        self.dependents
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
