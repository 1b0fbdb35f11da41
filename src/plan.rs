// src/plan.rs

//! Turn a validated config into a ready-to-run [`TaskManager`].

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::debug;

use crate::config::{ConfigFile, TaskConfig};
use crate::dag::{StatusSnapshot, TaskBody};
use crate::engine::{RunOptions, TaskManager};
use crate::exec::command_body;
use crate::types::{TaskId, TaskStatus};

/// A [`TaskManager`] populated from a config, plus the name <-> id mapping.
#[derive(Debug)]
pub struct Plan {
    manager: Arc<TaskManager>,
    names: BTreeMap<TaskId, String>,
}

impl Plan {
    /// Shell-command tasks with the options from `[config]`.
    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::with_options(cfg, cfg.config.run_options())
    }

    /// Shell-command tasks with explicit options (e.g. CLI overrides).
    pub fn with_options(cfg: &ConfigFile, options: RunOptions) -> Self {
        Self::with_bodies(cfg, options, |task| command_body(&task.name, &task.cmd))
    }

    /// Register every task of `cfg`, in declaration order, using `make_body`
    /// to build each body.
    pub fn with_bodies<F>(cfg: &ConfigFile, options: RunOptions, mut make_body: F) -> Self
    where
        F: FnMut(&TaskConfig) -> TaskBody,
    {
        let manager = TaskManager::with_options(options);

        // A fresh manager hands out ids 1, 2, 3, ... in registration order,
        // so every name's id is known up front and `after` may point forward.
        let ids: HashMap<&str, TaskId> = cfg
            .task
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.as_str(), TaskId::new(i as u64 + 1)))
            .collect();

        let mut names = BTreeMap::new();
        for task in cfg.task.iter() {
            let deps: Vec<TaskId> = task
                .after
                .iter()
                .filter_map(|dep| ids.get(dep.as_str()).copied())
                .collect();

            let id = manager.register_boxed(make_body(task), task.priority, deps, task.timeout());
            debug_assert_eq!(ids.get(task.name.as_str()), Some(&id));
            debug!(task = %id, name = %task.name, "registered plan task");

            names.insert(id, task.name.clone());
        }

        Self {
            manager: Arc::new(manager),
            names,
        }
    }

    pub fn manager(&self) -> &Arc<TaskManager> {
        &self.manager
    }

    pub fn name_of(&self, id: TaskId) -> Option<&str> {
        self.names.get(&id).map(|s| s.as_str())
    }

    pub fn id_of(&self, name: &str) -> Option<TaskId> {
        self.names
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(id, _)| *id)
    }

    /// `(name, status)` pairs in registration order.
    pub fn named_statuses(&self, snapshot: &StatusSnapshot) -> Vec<(String, TaskStatus)> {
        snapshot
            .iter()
            .map(|(id, status)| {
                let name = self
                    .name_of(id)
                    .map(str::to_string)
                    .unwrap_or_else(|| id.to_string());
                (name, status)
            })
            .collect()
    }
}
