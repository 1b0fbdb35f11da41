// src/report.rs

//! Human-facing status output for the CLI.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::config::ConfigFile;
use crate::dag::StatusSnapshot;
use crate::engine::TaskManager;
use crate::plan::Plan;
use crate::types::TaskStatus;

/// Periodically log a status summary until the returned handle is aborted.
pub fn spawn_status_reporter(manager: Arc<TaskManager>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let snapshot = manager.snapshot();
            info!(
                pending = snapshot.count(TaskStatus::Pending),
                running = snapshot.count(TaskStatus::Running),
                completed = snapshot.count(TaskStatus::Completed),
                failed = snapshot.count(TaskStatus::Failed),
                timed_out = snapshot.count(TaskStatus::Timeout),
                canceled = snapshot.count(TaskStatus::Canceled),
                "status"
            );
        }
    })
}

/// Final per-task table.
pub fn render_report(plan: &Plan, snapshot: &StatusSnapshot) -> String {
    let rows = plan.named_statuses(snapshot);
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (name, status) in rows {
        out.push_str(&format!("{name:<width$}  {status}\n"));
    }
    out
}

/// Dry-run output: tasks, priorities, dependencies and commands.
pub fn render_dry_run(cfg: &ConfigFile) -> String {
    let mut out = String::from("taskmill dry-run\n");
    out.push_str(&format!("  config.concurrency = {}\n", cfg.config.concurrency));
    out.push_str(&format!(
        "  config.exit_when_stalled = {}\n",
        cfg.config.exit_when_stalled
    ));
    out.push_str(&format!(
        "  config.abort_on_timeout = {}\n\n",
        cfg.config.abort_on_timeout
    ));

    out.push_str(&format!("tasks ({}):\n", cfg.task.len()));
    for task in cfg.task.iter() {
        out.push_str(&format!("  - {}\n", task.name));
        out.push_str(&format!("      cmd: {}\n", task.cmd));
        out.push_str(&format!("      priority: {}\n", task.priority));
        if !task.after.is_empty() {
            out.push_str(&format!("      after: {:?}\n", task.after));
        }
        if let Some(ms) = task.timeout_ms {
            out.push_str(&format!("      timeout_ms: {ms}\n"));
        }
    }
    out
}
