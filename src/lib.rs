// src/lib.rs

//! Bounded-concurrency task scheduler with priorities, dependencies,
//! per-task timeouts and cascading cancellation.
//!
//! The library entry point is [`TaskManager`]. The `taskmill` binary wraps it
//! with a TOML plan of shell commands (see [`config`]).

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod plan;
pub mod report;
pub mod types;

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

pub use crate::dag::StatusSnapshot;
pub use crate::engine::{RunOptions, TaskManager, TaskOutcome};
pub use crate::errors::TaskmillError;
pub use crate::types::{Priority, TaskId, TaskStatus};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::plan::Plan;
use crate::report::{render_dry_run, render_report, spawn_status_reporter};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the task manager populated from the plan
/// - optional periodic status reporting
/// - the final report on stdout
///
/// Returns `true` if every task completed.
pub async fn run(args: CliArgs) -> Result<bool> {
    let cfg = load_and_validate(&args.config)
        .with_context(|| format!("loading plan from '{}'", args.config))?;

    if args.dry_run {
        print!("{}", render_dry_run(&cfg));
        debug!("dry-run complete (no execution)");
        return Ok(true);
    }

    let mut options = cfg.config.run_options();
    if let Some(n) = args.concurrency {
        options.concurrency = n.get();
    }

    let plan = Plan::with_options(&cfg, options);

    let reporter = args
        .report_interval_ms
        .filter(|ms| *ms > 0)
        .map(|ms| spawn_status_reporter(plan.manager().clone(), Duration::from_millis(ms)));

    plan.manager().run().await;

    if let Some(handle) = reporter {
        handle.abort();
    }

    let snapshot = plan.manager().snapshot();
    print!("{}", render_report(&plan, &snapshot));

    Ok(snapshot.all_completed())
}
