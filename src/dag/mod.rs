// src/dag/mod.rs

//! Task bookkeeping and the synchronous scheduling core.
//!
//! - [`registry`] stores task records in an id-indexed arena.
//! - [`graph`] keeps prerequisite and dependent edges.
//! - [`ready_queue`] orders pending tasks by priority, then insertion.
//! - [`state_manager`] decides eligibility and cascades cancellation.
//! - [`scheduler`] ties them together into the launch/complete state machine.
//! - [`scheduler_step`] is the result type of one scheduler step.
//! - [`snapshot`] is the read-only status report.
//! - [`task_info`] holds task records, bodies and launch descriptors.

pub mod graph;
pub mod ready_queue;
pub mod registry;
pub mod scheduler;
pub mod scheduler_step;
pub mod snapshot;
pub mod state_manager;
pub mod task_info;

pub use graph::DependencyGraph;
pub use ready_queue::ReadyQueue;
pub use registry::TaskRegistry;
pub use scheduler::Scheduler;
pub use scheduler_step::SchedulerStep;
pub use snapshot::StatusSnapshot;
pub use task_info::{LaunchedTask, TaskBody, TaskFuture, boxed_body};
