// src/cli.rs

//! Command-line flags of the `taskmill` binary.

use std::num::NonZeroUsize;

use clap::{Parser, ValueEnum};

use crate::config::DEFAULT_PLAN_FILE;

/// Command-line arguments for `taskmill`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskmill",
    version,
    about = "Run a batch of commands with priorities, dependencies, timeouts and a concurrency limit.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the task plan (TOML).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PLAN_FILE)]
    pub config: String,

    /// Override `[config].concurrency` from the plan.
    #[arg(long, value_name = "N")]
    pub concurrency: Option<NonZeroUsize>,

    /// Log a status summary every N milliseconds while the run is active.
    #[arg(long, value_name = "MS")]
    pub report_interval_ms: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKMILL_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the plan, but don't execute any commands.
    #[arg(long)]
    pub dry_run: bool,
}

/// Values accepted by `--log-level`.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse `std::env::args`, exiting with usage on error.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
