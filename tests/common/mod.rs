#![allow(dead_code)]

pub use taskmill_test_utils::{bodies, builders, init_tracing, with_timeout};

use std::sync::Arc;

use taskmill::{TaskId, TaskManager};
use tokio::task::JoinHandle;

/// Start `manager.run()` on a background task.
pub fn spawn_run(manager: &Arc<TaskManager>) -> JoinHandle<()> {
    let manager = Arc::clone(manager);
    tokio::spawn(async move { manager.run().await })
}

pub fn id(n: u64) -> TaskId {
    TaskId::new(n)
}
