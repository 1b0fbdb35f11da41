// src/logging.rs

//! Logging setup for the `taskmill` binary.
//!
//! The filter is chosen from, in order:
//! 1. the `--log-level` flag, applied to every target;
//! 2. `TASKMILL_LOG`, read as an `EnvFilter` directive string
//!    (e.g. `info` or `taskmill::engine=debug,warn`);
//! 3. `info`.
//!
//! Logs go to stderr; stdout carries only the final report.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV_VAR: &str = "TASKMILL_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let filter = EnvFilter::try_new(filter_directive(cli_level, env.as_deref()))
        .with_context(|| format!("invalid {LOG_ENV_VAR} filter"))?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}

fn filter_directive(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    match (cli_level, env.map(str::trim).filter(|s| !s.is_empty())) {
        (Some(level), _) => level.as_directive().to_string(),
        (None, Some(directives)) => directives.to_string(),
        (None, None) => DEFAULT_DIRECTIVE.to_string(),
    }
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
