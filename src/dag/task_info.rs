// src/dag/task_info.rs

//! Task records held by the registry, and the launch descriptor handed to the
//! executor.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::types::{Priority, TaskId, TaskStatus};

/// Future produced by invoking a task body.
pub type TaskFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'static>>;

/// Zero-argument asynchronous unit of work.
///
/// A body is invoked at most once: tasks are never retried.
pub type TaskBody = Box<dyn FnOnce() -> TaskFuture + Send + 'static>;

/// Box an async closure into a [`TaskBody`].
pub fn boxed_body<F, Fut>(body: F) -> TaskBody
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Box::new(move || -> TaskFuture { Box::pin(body()) })
}

/// A registered task: static definition plus its status cell.
pub struct TaskRecord {
    pub id: TaskId,
    pub priority: Priority,
    /// Direct prerequisites, deduplicated, in registration order.
    pub prerequisites: Vec<TaskId>,
    pub timeout: Option<Duration>,
    pub status: TaskStatus,
    /// Present until the task is launched.
    body: Option<TaskBody>,
}

impl TaskRecord {
    pub fn new(
        id: TaskId,
        body: TaskBody,
        priority: Priority,
        prerequisites: Vec<TaskId>,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            id,
            priority,
            prerequisites,
            timeout,
            status: TaskStatus::Pending,
            body: Some(body),
        }
    }

    /// Take the body out for launching. Returns `None` on a second call.
    pub fn take_body(&mut self) -> Option<TaskBody> {
        self.body.take()
    }
}

impl fmt::Debug for TaskRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRecord")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("prerequisites", &self.prerequisites)
            .field("timeout", &self.timeout)
            .field("status", &self.status)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// A task the scheduler has just moved to `Running` and wants started now.
pub struct LaunchedTask {
    pub id: TaskId,
    pub priority: Priority,
    pub timeout: Option<Duration>,
    pub body: TaskBody,
}

impl fmt::Debug for LaunchedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchedTask")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
