// src/engine/manager.rs

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::dag::{Scheduler, StatusSnapshot, TaskBody, boxed_body};
use crate::engine::runtime::Runtime;
use crate::engine::{RunOptions, RuntimeEvent};
use crate::errors::Result;
use crate::types::{Priority, TaskId, TaskStatus};

/// Bounded-concurrency, dependency-aware task scheduler.
///
/// All methods take `&self`, so a manager wrapped in an `Arc` can be used to
/// register tasks, change priorities and take snapshots while [`run`] is in
/// progress on another task. Every state change goes through one lock that
/// is never held across an `.await`.
///
/// ```no_run
/// use std::time::Duration;
/// use taskmill::TaskManager;
///
/// # async fn demo() {
/// let manager = TaskManager::new(2);
/// let fetch = manager.register(|| async { Ok(()) }, 2, [], None);
/// manager.register(|| async { Ok(()) }, 1, [fetch], Some(Duration::from_secs(5)));
/// manager.run().await;
/// println!("{}", manager.snapshot());
/// # }
/// ```
///
/// [`run`]: TaskManager::run
#[derive(Debug)]
pub struct TaskManager {
    core: Mutex<Scheduler>,
    options: RunOptions,
    event_tx: mpsc::UnboundedSender<RuntimeEvent>,
    /// Held for the whole duration of a run, so runs never overlap.
    event_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<RuntimeEvent>>,
}

impl TaskManager {
    /// Manager with the given concurrency limit and default options.
    pub fn new(concurrency: usize) -> Self {
        Self::with_options(RunOptions::new(concurrency))
    }

    pub fn with_options(options: RunOptions) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            core: Mutex::new(Scheduler::new(options.concurrency)),
            options,
            event_tx,
            event_rx: tokio::sync::Mutex::new(event_rx),
        }
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    /// Register a task and return its id.
    ///
    /// `body` is invoked once, when the task is launched. Prerequisites may
    /// name ids that are not registered (yet); the task stays pending until
    /// each of them has completed.
    pub fn register<F, Fut, I>(
        &self,
        body: F,
        priority: Priority,
        prerequisites: I,
        timeout: Option<Duration>,
    ) -> TaskId
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
        I: IntoIterator<Item = TaskId>,
    {
        self.register_boxed(boxed_body(body), priority, prerequisites, timeout)
    }

    /// Like [`register`](TaskManager::register), for an already boxed body.
    pub fn register_boxed<I>(
        &self,
        body: TaskBody,
        priority: Priority,
        prerequisites: I,
        timeout: Option<Duration>,
    ) -> TaskId
    where
        I: IntoIterator<Item = TaskId>,
    {
        let prerequisites: Vec<TaskId> = prerequisites.into_iter().collect();
        let id = lock_core(&self.core).register(body, priority, &prerequisites, timeout);

        // Wakes a run that is waiting for progress.
        if self.event_tx.send(RuntimeEvent::TaskRegistered { id }).is_err() {
            debug!(task = %id, "event channel closed; registration not announced");
        }
        id
    }

    /// Replace the priority of a pending task.
    ///
    /// Running and finished tasks are not affected. Fails only if `id` was
    /// never registered.
    pub fn change_priority(&self, id: TaskId, priority: Priority) -> Result<()> {
        lock_core(&self.core).change_priority(id, priority)
    }

    /// Point-in-time copy of every task's status.
    pub fn snapshot(&self) -> StatusSnapshot {
        lock_core(&self.core).snapshot()
    }

    pub fn status_of(&self, id: TaskId) -> Option<TaskStatus> {
        lock_core(&self.core).status_of(id)
    }

    pub fn running_count(&self) -> usize {
        lock_core(&self.core).running_count()
    }

    /// Execute queued tasks until nothing is queued and nothing is running.
    ///
    /// Task failures, timeouts and cancellations are recorded per task and
    /// never returned from here; inspect [`snapshot`](TaskManager::snapshot)
    /// afterwards. Concurrent calls are serialized.
    pub async fn run(&self) {
        let mut event_rx = self.event_rx.lock().await;
        Runtime::new(&self.core, &mut event_rx, self.event_tx.clone(), self.options)
            .run()
            .await;
    }
}

/// Lock the scheduling core.
///
/// A panic while the lock is held cannot leave the core half-updated (no
/// user code runs under it), so a poisoned lock is recovered.
pub(crate) fn lock_core(core: &Mutex<Scheduler>) -> MutexGuard<'_, Scheduler> {
    core.lock().unwrap_or_else(PoisonError::into_inner)
}
