use std::fmt;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::dag::{LaunchedTask, Scheduler, SchedulerStep};
use crate::engine::manager::lock_core;
use crate::engine::{RunOptions, RuntimeEvent};
use crate::exec::spawn_task;
use crate::types::TaskStatus;

/// Drives the scheduling core for one run.
///
/// The core decides what to launch; this loop starts the launched bodies,
/// then sleeps until the next [`RuntimeEvent`] (a completion or a new
/// registration) and feeds it back into the core. It is the only place
/// completions are applied, so every completion re-scans the queue.
pub struct Runtime<'a> {
    core: &'a Mutex<Scheduler>,
    event_rx: &'a mut mpsc::UnboundedReceiver<RuntimeEvent>,
    event_tx: mpsc::UnboundedSender<RuntimeEvent>,
    options: RunOptions,
}

impl fmt::Debug for Runtime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<'a> Runtime<'a> {
    pub fn new(
        core: &'a Mutex<Scheduler>,
        event_rx: &'a mut mpsc::UnboundedReceiver<RuntimeEvent>,
        event_tx: mpsc::UnboundedSender<RuntimeEvent>,
        options: RunOptions,
    ) -> Self {
        Self {
            core,
            event_rx,
            event_tx,
            options,
        }
    }

    /// Main event loop. Returns once the queue is empty and no task is
    /// running (or, with `exit_when_stalled`, once no progress is possible).
    pub async fn run(self) {
        let (queued, limit) = {
            let core = lock_core(self.core);
            (core.queued_ids().len(), core.concurrency())
        };
        info!(queued, limit, "task run started");

        let mut step = lock_core(self.core).step_launch();
        let mut reported_stall = false;

        loop {
            let SchedulerStep {
                launched,
                drained,
                stalled,
                ..
            } = step;

            self.spawn_launched(launched);

            if drained {
                break;
            }

            if stalled {
                if self.options.exit_when_stalled {
                    warn!("queued tasks can never become eligible; ending run");
                    break;
                }
                if !reported_stall {
                    warn!("queued tasks are blocked; waiting for new registrations");
                    reported_stall = true;
                }
            } else {
                reported_stall = false;
            }

            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; ending run");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            step = match event {
                RuntimeEvent::TaskCompleted { id, outcome } => {
                    lock_core(self.core).step_completion(id, outcome)
                }
                RuntimeEvent::TaskRegistered { .. } => lock_core(self.core).step_launch(),
            };
        }

        let snapshot = lock_core(self.core).snapshot();
        info!(
            completed = snapshot.count(TaskStatus::Completed),
            failed = snapshot.count(TaskStatus::Failed),
            timed_out = snapshot.count(TaskStatus::Timeout),
            canceled = snapshot.count(TaskStatus::Canceled),
            pending = snapshot.count(TaskStatus::Pending),
            "task run finished"
        );
    }

    fn spawn_launched(&self, launched: Vec<LaunchedTask>) {
        for task in launched {
            spawn_task(task, self.event_tx.clone(), self.options.abort_on_timeout);
        }
    }
}
