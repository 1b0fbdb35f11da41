// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::engine::RunOptions;
use crate::types::Priority;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [config]
/// concurrency = 2
///
/// [[task]]
/// name = "fetch"
/// cmd = "sleep 2"
/// priority = 2
///
/// [[task]]
/// name = "build"
/// cmd = "sleep 1"
/// priority = 1
/// after = ["fetch"]
/// timeout_ms = 1500
/// ```
///
/// Tasks are an array of tables so that declaration order survives parsing:
/// it is the registration order, and with it the tie-break between tasks of
/// equal priority.
///
/// This is the unchecked form; see [`ConfigFile`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All tasks from `[[task]]`, in declaration order.
    #[serde(default)]
    pub task: Vec<TaskConfig>,
}

/// A validated configuration.
///
/// Guarantees (see `config::validate`):
/// - at least one task, all with unique non-empty names;
/// - every `after` entry names a declared task other than itself;
/// - the dependency graph is acyclic;
/// - `concurrency >= 1`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub task: Vec<TaskConfig>,
}

impl ConfigFile {
    /// Wrap parts that are already known to be valid.
    pub(crate) fn new_unchecked(config: ConfigSection, task: Vec<TaskConfig>) -> Self {
        Self { config, task }
    }

    pub fn task_by_name(&self, name: &str) -> Option<&TaskConfig> {
        self.task.iter().find(|t| t.name == name)
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Maximum number of tasks running at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// End the run when the remaining queued tasks can never become
    /// eligible, instead of waiting.
    #[serde(default)]
    pub exit_when_stalled: bool,

    /// Kill a task's process when its timeout elapses instead of leaving it
    /// running in the background.
    #[serde(default)]
    pub abort_on_timeout: bool,
}

fn default_concurrency() -> usize {
    1
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            exit_when_stalled: false,
            abort_on_timeout: false,
        }
    }
}

impl ConfigSection {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            concurrency: self.concurrency,
            exit_when_stalled: self.exit_when_stalled,
            abort_on_timeout: self.abort_on_timeout,
        }
    }
}

/// One `[[task]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// Unique name, referenced from other tasks' `after`.
    pub name: String,

    /// The command to execute.
    pub cmd: String,

    /// Higher runs first among ready tasks.
    #[serde(default)]
    pub priority: Priority,

    /// Tasks that must complete before this one may start.
    #[serde(default)]
    pub after: Vec<String>,

    /// Optional timeout in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl TaskConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
