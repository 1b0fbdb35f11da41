// src/engine/mod.rs

//! Async execution engine.
//!
//! This module ties together:
//! - the synchronous scheduling core ([`crate::dag::Scheduler`])
//! - the task runners that race bodies against their timeouts
//! - the driver loop that reacts to:
//!   - task completion events
//!   - registrations made while a run is in progress
//!
//! The public facade is [`TaskManager`]; the driver loop itself lives in
//! [`runtime`].

use crate::types::TaskId;

/// Outcome of a task body as seen by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    /// The body returned an error or panicked.
    Failed(String),
    /// The timeout fired before the body finished.
    TimedOut,
}

/// Options for a [`TaskManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Maximum number of tasks running at once. 0 is treated as 1.
    pub concurrency: usize,
    /// If true, `run()` returns as soon as queued work can make no further
    /// progress (nothing running, nothing eligible). Otherwise it waits for a
    /// registration that unblocks the queue.
    pub exit_when_stalled: bool,
    /// If true, a timed-out body is aborted. Otherwise it keeps running
    /// detached and its result is ignored.
    pub abort_on_timeout: bool,
}

impl RunOptions {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency,
            ..Self::default()
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            exit_when_stalled: false,
            abort_on_timeout: false,
        }
    }
}

/// Events flowing into the driver loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// A task was registered; it may be launchable now.
    TaskRegistered { id: TaskId },
    /// A running task finished (or timed out).
    TaskCompleted { id: TaskId, outcome: TaskOutcome },
}

pub mod manager;
pub mod runtime;

pub use manager::TaskManager;
